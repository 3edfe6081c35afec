//! Testing utilities for the tcode workspace
//!
//! Column fixtures, proptest strategies, and synthetic columns for benchmarks.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use proptest::prelude::*;
use tcode_model::{Column, Millis};

/// One fixture cell: onset, offset, values in schema order
pub type CellSpec<'a> = (Millis, Millis, &'a [&'a str]);

/// Build a column with `args` and the given cells, in the given order
pub fn column(name: &str, args: &[&str], cells: &[CellSpec<'_>]) -> Column {
    let mut col = Column::with_arguments(name, args).unwrap();
    for &(onset, offset, values) in cells {
        let mut cell = col.add_interval();
        cell.set_onset(onset).set_offset(offset);
        for (arg, value) in args.iter().zip(values) {
            cell.set_arg(arg, *value).unwrap();
        }
    }
    col
}

/// Column with a single argument and no values set
pub fn spans(name: &str, arg: &str, cells: &[(Millis, Millis)]) -> Column {
    let specs: Vec<CellSpec<'_>> = cells.iter().map(|&(on, off)| (on, off, &[][..])).collect();
    column(name, &[arg], &specs)
}

/// Looking-time style column: `target` coded over alternating bouts
pub fn looking_column() -> Column {
    column(
        "looking",
        &["target", "hand"],
        &[
            (1_000, 2_000, &["toy", "left"]),
            (2_500, 4_000, &["mom", ""]),
            (4_000, 6_500, &["toy", "right"]),
        ],
    )
}

/// Trial column spanning the looking bouts
pub fn trial_column() -> Column {
    column(
        "trial",
        &["trialnum", "unit"],
        &[(500, 3_000, &["1", "a"]), (3_000, 7_000, &["2", "b"])],
    )
}

/// Strategy for a column the merge accepts
///
/// Onsets start at 1 so no offset is unset. Cells come in arbitrary onset order,
/// may be points (`onset == offset`), and may be repeated verbatim. Ordinals
/// follow insertion order, not onset order.
pub fn arb_column(name: &'static str, arg: &'static str, max_cells: usize) -> impl Strategy<Value = Column> {
    let cell = (1u64..500, 0u64..80, "[abc]", prop::bool::weighted(0.15));
    prop::collection::vec(cell, 0..=max_cells).prop_map(move |cells| {
        let mut col = Column::with_arguments(name, [arg]).unwrap();
        for (onset, len, value, repeated) in cells {
            for _ in 0..if repeated { 2 } else { 1 } {
                col.add_interval()
                    .set_onset(onset)
                    .set_offset(onset + len)
                    .set_arg(arg, value.as_str())
                    .unwrap();
            }
        }
        col
    })
}

/// Deterministic column of `count` back-to-back intervals of length `step`,
/// with a gap after every `gap_every`-th interval
pub fn synthetic_column(name: &str, count: usize, step: Millis, gap_every: usize) -> Column {
    let mut col = Column::with_arguments(name, ["code", "note"]).unwrap();
    let mut onset: Millis = 1;
    for i in 0..count {
        let offset = onset + step;
        col.add_interval()
            .set_onset(onset)
            .set_offset(offset)
            .set_arg("code", if i % 2 == 0 { "x" } else { "y" })
            .unwrap();
        onset = if gap_every > 0 && (i + 1) % gap_every == 0 {
            offset + step
        } else {
            offset
        };
    }
    col
}
