//! Time-coded intervals
//!
//! Provides [`Interval`], a single coded cell: an ordinal, an onset/offset pair in
//! milliseconds, and argument values aligned with the owning column's schema.

use serde::{Deserialize, Serialize};

/// Millisecond timestamp
pub type Millis = u64;

/// A single time-bounded cell
///
/// Values are positional: `values[i]` belongs to the owning column's `i`-th argument.
/// Unset values are empty strings.
///
/// # Invariants
/// - A well-formed interval has `offset >= onset`; `onset == offset` is a point.
/// - `offset == 0` means the offset was never set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    ordinal: u32,
    onset: Millis,
    offset: Millis,
    #[serde(default)]
    values: Vec<String>,
}

impl Interval {
    /// Create interval with explicit values
    #[inline]
    #[must_use]
    pub fn new(onset: Millis, offset: Millis, values: Vec<String>) -> Self {
        Self {
            ordinal: 0,
            onset,
            offset,
            values,
        }
    }

    /// Zero-valued interval with `width` empty argument slots
    #[inline]
    #[must_use]
    pub fn blank(width: usize) -> Self {
        Self::new(0, 0, vec![String::new(); width])
    }

    /// Set ordinal, returning self
    #[inline]
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Position within the owning column (1-based once numbered)
    #[inline]
    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Onset in milliseconds
    #[inline]
    #[must_use]
    pub fn onset(&self) -> Millis {
        self.onset
    }

    /// Offset in milliseconds
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Millis {
        self.offset
    }

    /// Argument values in schema order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at schema position `index`
    #[inline]
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Number of value slots
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// Set ordinal
    #[inline]
    pub fn set_ordinal(&mut self, ordinal: u32) {
        self.ordinal = ordinal;
    }

    /// Set onset
    #[inline]
    pub fn set_onset(&mut self, onset: Millis) {
        self.onset = onset;
    }

    /// Set offset
    #[inline]
    pub fn set_offset(&mut self, offset: Millis) {
        self.offset = offset;
    }

    /// Overwrite the value at schema position `index`
    ///
    /// Returns `false` if `index` is out of range.
    #[inline]
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Blank every value slot
    #[inline]
    pub fn clear_values(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    pub(crate) fn push_slot(&mut self) {
        self.values.push(String::new());
    }

    pub(crate) fn remove_slot(&mut self, index: usize) {
        if index < self.values.len() {
            self.values.remove(index);
        }
    }

    /// Span length (zero for inverted intervals)
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Millis {
        self.offset.saturating_sub(self.onset)
    }

    /// Onset is after offset
    #[inline]
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.onset > self.offset
    }

    /// Offset was never set
    #[inline]
    #[must_use]
    pub fn has_unset_offset(&self) -> bool {
        self.offset == 0
    }

    /// Span covers the whole half-open slice `[start, end)`
    #[inline]
    #[must_use]
    pub fn covers(&self, start: Millis, end: Millis) -> bool {
        self.onset <= start && self.offset >= end
    }

    /// This interval lies temporally inside `outer`
    #[inline]
    #[must_use]
    pub fn is_within(&self, outer: &Self) -> bool {
        outer.onset <= self.onset && outer.offset >= self.offset
    }

    /// `inner` lies temporally inside this interval
    #[inline]
    #[must_use]
    pub fn contains(&self, inner: &Self) -> bool {
        inner.is_within(self)
    }

    /// `time` falls in the closed span `[onset, offset]`
    #[inline]
    #[must_use]
    pub fn contains_time(&self, time: Millis) -> bool {
        self.onset <= time && time <= self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(onset: Millis, offset: Millis) -> Interval {
        Interval::new(onset, offset, vec![])
    }

    #[test]
    fn blank_has_empty_slots() {
        let cell = Interval::blank(3);
        assert_eq!(cell.values(), &["", "", ""]);
        assert_eq!(cell.onset(), 0);
        assert_eq!(cell.offset(), 0);
        assert_eq!(cell.ordinal(), 0);
        assert!(cell.has_unset_offset());
    }

    #[test]
    fn set_value_in_and_out_of_range() {
        let mut cell = Interval::blank(2);
        assert!(cell.set_value(1, "b"));
        assert!(!cell.set_value(2, "c"));
        assert_eq!(cell.value(1), Some("b"));
        assert_eq!(cell.value(2), None);

        cell.clear_values();
        assert_eq!(cell.value(1), Some(""));
    }

    #[test]
    fn slot_edits_preserve_positions() {
        let mut cell = Interval::new(0, 10, vec!["a".into(), "b".into(), "c".into()]);
        cell.remove_slot(1);
        assert_eq!(cell.values(), &["a", "c"]);
        cell.push_slot();
        assert_eq!(cell.values(), &["a", "c", ""]);
    }

    #[test]
    fn temporal_predicates() {
        let outer = iv(0, 100);
        let inner = iv(10, 20);
        assert!(inner.is_within(&outer));
        assert!(outer.contains(&inner));
        assert!(!outer.is_within(&inner));

        assert!(outer.contains_time(0));
        assert!(outer.contains_time(100));
        assert!(!outer.contains_time(101));

        assert!(outer.covers(0, 100));
        assert!(outer.covers(50, 60));
        assert!(!inner.covers(5, 15));
    }

    #[test]
    fn inverted_and_duration() {
        assert!(iv(10, 5).is_inverted());
        assert_eq!(iv(10, 5).duration(), 0);
        assert!(!iv(5, 5).is_inverted());
        assert_eq!(iv(5, 25).duration(), 20);
    }
}
