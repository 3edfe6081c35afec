//! Precondition scans over input columns
//!
//! A merge never starts on a column holding an inverted interval or one whose
//! offset was never set.

use crate::error::{IntervalDiagnostic, IntervalFault, MergeError};
use tcode_model::{Column, Interval};

/// Every fault in `column`, in interval order
///
/// An interval with both faults is reported twice, inverted first.
#[must_use]
pub fn scan_for_bad_cells(column: &Column) -> Vec<IntervalDiagnostic> {
    let mut found = Vec::new();
    for (index, interval) in column.intervals().iter().enumerate() {
        for fault in [IntervalFault::Inverted, IntervalFault::UnsetOffset] {
            if fault.applies_to(interval) {
                found.push(IntervalDiagnostic::new(fault, column.name(), index, interval));
            }
        }
    }
    found
}

/// Fail on the first interval in `column` showing `fault`
///
/// # Errors
/// Returns [`MergeError::InvalidInterval`] naming the offending interval
pub fn check_fault(column: &Column, fault: IntervalFault) -> Result<(), MergeError> {
    match column
        .intervals()
        .iter()
        .position(|interval| fault.applies_to(interval))
    {
        Some(index) => {
            let diagnostic =
                IntervalDiagnostic::new(fault, column.name(), index, &column.intervals()[index]);
            tracing::warn!(%diagnostic, "column failed validation");
            Err(diagnostic.into())
        }
        None => Ok(()),
    }
}

/// Fail fast on the first faulty interval of a single column
///
/// # Errors
/// Returns [`MergeError::InvalidInterval`] naming the offending interval
pub fn ensure_valid(column: &Column) -> Result<(), MergeError> {
    check_fault(column, IntervalFault::Inverted)?;
    check_fault(column, IntervalFault::UnsetOffset)
}

/// Validate both merge inputs
///
/// Inverted intervals are checked in both columns before unset offsets are.
///
/// # Errors
/// Returns [`MergeError::InvalidInterval`] for the first fault found
pub fn validate_pair(a: &Column, b: &Column) -> Result<(), MergeError> {
    check_fault(a, IntervalFault::Inverted)?;
    check_fault(b, IntervalFault::Inverted)?;
    check_fault(a, IntervalFault::UnsetOffset)?;
    check_fault(b, IntervalFault::UnsetOffset)
}

/// Intervals that start before the previous interval (in onset order) ends
///
/// Touching intervals (offset equal to the next onset) count as overlapping.
#[must_use]
pub fn later_overlapping_cells(column: &Column) -> Vec<&Interval> {
    let mut ordered: Vec<&Interval> = column.intervals().iter().collect();
    ordered.sort_by_key(|interval| interval.onset());

    ordered
        .windows(2)
        .filter(|pair| pair[0].onset() <= pair[1].onset() && pair[0].offset() >= pair[1].onset())
        .map(|pair| pair[1])
        .collect()
}
