//! Active-cell locator
//!
//! Finds, for each slice of a sweep, the interval of one column that fully covers it.

use crate::boundary::Slice;
use tcode_model::{Column, Interval};

/// Forward-only cursor over one column's onset-sorted intervals
///
/// The cursor only moves when a covering interval is found, and only ever forward.
/// Slices must be presented in ascending order.
#[derive(Debug, Clone)]
pub struct ActiveCellLocator<'a> {
    intervals: &'a [Interval],
    cursor: usize,
    touched: usize,
}

impl<'a> ActiveCellLocator<'a> {
    /// Create locator over intervals sorted by onset
    #[inline]
    #[must_use]
    pub fn new(intervals: &'a [Interval]) -> Self {
        debug_assert!(intervals.windows(2).all(|w| w[0].onset() <= w[1].onset()));
        Self {
            intervals,
            cursor: 0,
            touched: 0,
        }
    }

    /// Create locator over a sorted column
    #[inline]
    #[must_use]
    pub fn for_column(column: &'a Column) -> Self {
        Self::new(column.intervals())
    }

    /// Interval covering `slice`, if any
    ///
    /// Scans from the cursor and stops at the first interval starting after the
    /// slice, since no later interval can cover it.
    pub fn locate(&mut self, slice: Slice) -> Option<&'a Interval> {
        for (index, interval) in self.intervals.iter().enumerate().skip(self.cursor) {
            self.touched += 1;
            if interval.onset() > slice.start {
                break;
            }
            if interval.covers(slice.start, slice.end) {
                self.cursor = index;
                return Some(interval);
            }
        }
        None
    }

    /// Current cursor position
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Intervals inspected so far
    #[inline]
    #[must_use]
    pub fn candidates_touched(&self) -> usize {
        self.touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(list: &[(u64, u64)]) -> Vec<Interval> {
        list.iter()
            .map(|&(onset, offset)| Interval::new(onset, offset, vec![]))
            .collect()
    }

    #[test]
    fn finds_covering_interval_and_advances() {
        let intervals = spans(&[(0, 5), (10, 15)]);
        let mut locator = ActiveCellLocator::new(&intervals);

        let first = locator.locate(Slice::new(0, 5)).unwrap();
        assert_eq!(first.onset(), 0);
        assert_eq!(locator.cursor(), 0);

        assert!(locator.locate(Slice::new(5, 10)).is_none());
        assert_eq!(locator.cursor(), 0);

        let second = locator.locate(Slice::new(10, 15)).unwrap();
        assert_eq!(second.onset(), 10);
        assert_eq!(locator.cursor(), 1);
    }

    #[test]
    fn long_interval_covers_many_slices() {
        let intervals = spans(&[(0, 100)]);
        let mut locator = ActiveCellLocator::new(&intervals);
        for (start, end) in [(0, 10), (10, 50), (50, 100)] {
            assert!(locator.locate(Slice::new(start, end)).is_some());
        }
        assert!(locator.locate(Slice::new(100, 120)).is_none());
    }

    #[test]
    fn partial_cover_is_not_active() {
        let intervals = spans(&[(5, 15)]);
        let mut locator = ActiveCellLocator::new(&intervals);
        assert!(locator.locate(Slice::new(0, 10)).is_none());
    }

    #[test]
    fn stops_at_later_onsets() {
        let intervals = spans(&[(50, 60), (70, 80), (90, 100)]);
        let mut locator = ActiveCellLocator::new(&intervals);
        assert!(locator.locate(Slice::new(0, 10)).is_none());
        assert_eq!(locator.candidates_touched(), 1);
    }

    #[test]
    fn empty_column_never_active() {
        let mut locator = ActiveCellLocator::new(&[]);
        assert!(locator.locate(Slice::new(0, 10)).is_none());
        assert_eq!(locator.candidates_touched(), 0);
    }
}
