//! Boundary set construction
//!
//! Provides [`BoundarySet`], the sorted distinct time-change points of two columns,
//! and the half-open [`Slice`]s between consecutive points.

use std::collections::BTreeSet;
use tcode_model::{Column, Interval, Millis};

/// Half-open elementary time range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slice {
    /// Inclusive start
    pub start: Millis,

    /// Exclusive end
    pub end: Millis,
}

impl Slice {
    /// Create new slice
    #[inline]
    #[must_use]
    pub fn new(start: Millis, end: Millis) -> Self {
        Self { start, end }
    }

    /// Slice length
    #[inline]
    #[must_use]
    pub fn len(&self) -> Millis {
        self.end - self.start
    }

    /// Whether the slice is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Sorted, deduplicated onset and offset values
///
/// Derived per merge and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundarySet {
    points: Vec<Millis>,
}

impl BoundarySet {
    /// Union of every onset and offset in both columns
    ///
    /// An empty column contributes nothing.
    #[must_use]
    pub fn from_columns(a: &Column, b: &Column) -> Self {
        Self::from_intervals(a.intervals().iter().chain(b.intervals()))
    }

    /// Union of every onset and offset in `intervals`
    #[must_use]
    pub fn from_intervals<'a>(intervals: impl IntoIterator<Item = &'a Interval>) -> Self {
        let points: BTreeSet<Millis> = intervals
            .into_iter()
            .flat_map(|interval| [interval.onset(), interval.offset()])
            .collect();
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Boundary points in ascending order
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Millis] {
        &self.points
    }

    /// Number of boundary points
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no boundary points
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of slices (one fewer than points, never negative)
    #[inline]
    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Consecutive slices `[points[i], points[i + 1])`
    pub fn slices(&self) -> impl ExactSizeIterator<Item = Slice> + '_ {
        self.points
            .windows(2)
            .map(|pair| Slice::new(pair[0], pair[1]))
    }
}
