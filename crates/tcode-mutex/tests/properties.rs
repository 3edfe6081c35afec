//! Property tests for the mutex merge.

use proptest::prelude::*;
use tcode_model::{Column, Interval};
use tcode_mutex::{BoundarySet, IntervalFault, MutexMerge, Slice};
use tcode_test_utils::arb_column;

/// First interval, in stable onset order, fully covering `slice`
///
/// The returned interval carries its onset rank as ordinal.
fn first_cover(column: &Column, slice: Slice) -> Option<Interval> {
    let mut sorted = column.clone();
    sorted.sort_by_onset();
    sorted.renumber();
    sorted
        .intervals()
        .iter()
        .find(|iv| iv.covers(slice.start, slice.end))
        .cloned()
}

fn expected_values(source: Option<&Interval>) -> (String, String) {
    source.map_or_else(
        || (String::new(), String::new()),
        |iv| (iv.ordinal().to_string(), iv.value(0).unwrap_or_default().to_string()),
    )
}

proptest! {
    #[test]
    fn prop_every_covered_slice_has_exactly_one_cell(
        a in arb_column("a", "x", 8),
        b in arb_column("b", "y", 8),
    ) {
        let boundaries = BoundarySet::from_columns(&a, &b);
        let outcome = MutexMerge::new("m").merge_ref(&a, &b).unwrap();

        for slice in boundaries.slices() {
            let covered = first_cover(&a, slice).is_some() || first_cover(&b, slice).is_some();
            let cells = outcome
                .column
                .intervals()
                .iter()
                .filter(|iv| iv.onset() == slice.start && iv.offset() == slice.end)
                .count();
            prop_assert_eq!(cells, usize::from(covered));
        }
        prop_assert!(outcome.column.len() <= boundaries.slice_count());
    }

    #[test]
    fn prop_values_come_from_the_covering_interval(
        a in arb_column("a", "x", 8),
        b in arb_column("b", "y", 8),
    ) {
        let outcome = MutexMerge::new("m").merge_ref(&a, &b).unwrap();
        let column = &outcome.column;

        for (index, cell) in column.intervals().iter().enumerate() {
            let slice = Slice::new(cell.onset(), cell.offset());
            let (a_ord, a_x) = expected_values(first_cover(&a, slice).as_ref());
            let (b_ord, b_y) = expected_values(first_cover(&b, slice).as_ref());

            prop_assert_eq!(column.arg_value(index, "a_ordinal").unwrap(), a_ord.as_str());
            prop_assert_eq!(column.arg_value(index, "a_x").unwrap(), a_x.as_str());
            prop_assert_eq!(column.arg_value(index, "b_ordinal").unwrap(), b_ord.as_str());
            prop_assert_eq!(column.arg_value(index, "b_y").unwrap(), b_y.as_str());
        }
    }

    #[test]
    fn prop_output_is_numbered_in_onset_order(
        a in arb_column("a", "x", 10),
        b in arb_column("b", "y", 10),
    ) {
        let column = MutexMerge::new("m").merge(a, b).unwrap().column;

        let ordinals: Vec<u32> = column.intervals().iter().map(Interval::ordinal).collect();
        let expected: Vec<u32> = (1..).take(column.len()).collect();
        prop_assert_eq!(ordinals, expected);

        for pair in column.intervals().windows(2) {
            prop_assert!(pair[0].offset() <= pair[1].onset());
        }
    }

    #[test]
    fn prop_point_cells_never_own_a_slice(
        a in arb_column("a", "x", 8),
        b in arb_column("b", "y", 8),
    ) {
        let column = MutexMerge::new("m").merge_ref(&a, &b).unwrap().column;
        for cell in column.intervals() {
            prop_assert!(cell.onset() < cell.offset());
        }
    }

    #[test]
    fn prop_unset_offset_is_reported_by_onset_rank(a in arb_column("a", "x", 8)) {
        let mut a = a;
        a.push_interval(Interval::new(0, 0, vec![String::new()])).unwrap();

        let err = MutexMerge::new("m").merge(a, Column::new("b")).unwrap_err();
        let diag = err.diagnostic().unwrap();

        prop_assert_eq!(diag.fault, IntervalFault::UnsetOffset);
        prop_assert_eq!(diag.column.as_str(), "a");
        prop_assert_eq!(diag.ordinal, 1);
    }

    #[test]
    fn prop_sorting_twice_changes_nothing(col in arb_column("c", "x", 12)) {
        let mut once = col.clone();
        once.sort_by_onset();
        let mut twice = once.clone();
        twice.sort_by_onset();

        prop_assert!(once.is_sorted_by_onset());
        prop_assert_eq!(once.intervals(), twice.intervals());
    }

    #[test]
    fn prop_every_cell_matches_the_layout(
        a in arb_column("a", "x", 6),
        b in arb_column("b", "y", 6),
    ) {
        let width = a.arg_count() + b.arg_count() + 2;
        let column = MutexMerge::new("m").merge(a, b).unwrap().column;

        prop_assert_eq!(column.arg_count(), width);
        for cell in column.intervals() {
            prop_assert_eq!(cell.width(), width);
        }
    }

    #[test]
    fn prop_empty_inputs_keep_schema(
        a_args in prop::collection::vec("[a-z]{1,6}", 0..4),
        b_args in prop::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let mut a_args = a_args;
        a_args.sort();
        a_args.dedup();
        let mut b_args = b_args;
        b_args.sort();
        b_args.dedup();

        let a = Column::with_arguments("left", &a_args).unwrap();
        let b = Column::with_arguments("right", &b_args).unwrap();
        let outcome = MutexMerge::new("m").merge(a, b).unwrap();

        prop_assert!(outcome.column.is_empty());
        prop_assert_eq!(outcome.column.arg_count(), a_args.len() + b_args.len() + 2);
        prop_assert_eq!(outcome.report.cells_created, 0);
    }
}
