//! Merge error and diagnostic types
//!
//! Provides [`MergeError`] and the [`IntervalDiagnostic`] that identifies the
//! offending interval when a precondition fails.

use std::fmt::{self, Display, Formatter};
use tcode_model::{Interval, Millis, ModelError, NameError};

/// Why an interval cannot take part in a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalFault {
    /// Onset is after offset
    Inverted,

    /// Offset was never set (zero)
    UnsetOffset,
}

impl IntervalFault {
    /// Check an interval for this fault
    #[inline]
    #[must_use]
    pub fn applies_to(self, interval: &Interval) -> bool {
        match self {
            Self::Inverted => interval.is_inverted(),
            Self::UnsetOffset => interval.has_unset_offset(),
        }
    }
}

/// Identity and timing of one faulty interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalDiagnostic {
    /// Kind of fault
    pub fault: IntervalFault,

    /// Column holding the interval
    pub column: String,

    /// Ordinal of the interval
    pub ordinal: u32,

    /// Position of the interval in the column
    pub index: usize,

    /// Onset at the time of the check
    pub onset: Millis,

    /// Offset at the time of the check
    pub offset: Millis,
}

impl IntervalDiagnostic {
    /// Build diagnostic for `interval` at `index` of `column`
    #[must_use]
    pub fn new(fault: IntervalFault, column: &str, index: usize, interval: &Interval) -> Self {
        Self {
            fault,
            column: column.to_string(),
            ordinal: interval.ordinal(),
            index,
            onset: interval.onset(),
            offset: interval.offset(),
        }
    }
}

impl Display for IntervalDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.fault {
            IntervalFault::Inverted => write!(
                f,
                "cell {} in column '{}': onset {} is after offset {}",
                self.ordinal, self.column, self.onset, self.offset
            ),
            IntervalFault::UnsetOffset => write!(
                f,
                "cell {} in column '{}': offset is blank",
                self.ordinal, self.column
            ),
        }
    }
}

/// Mutex merge error
///
/// Every variant is raised before the output column is assembled.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// An input interval violates a precondition
    #[error("invalid interval: {0}")]
    InvalidInterval(IntervalDiagnostic),

    /// Two output arguments end up with the same name
    #[error("merged schema would contain '{name}' twice (prefixes '{prefix_a}' and '{prefix_b}')")]
    PrefixCollision {
        /// Colliding output name
        name: String,
        /// Prefix used for the first column
        prefix_a: String,
        /// Prefix used for the second column
        prefix_b: String,
    },

    /// Column model rejected an operation
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl MergeError {
    /// Diagnostic for an invalid interval, if that is the failure
    #[inline]
    #[must_use]
    pub fn diagnostic(&self) -> Option<&IntervalDiagnostic> {
        match self {
            Self::InvalidInterval(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }

    /// Column name the failure points at, if any
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::InvalidInterval(diagnostic) => Some(&diagnostic.column),
            Self::Model(err) => err.column(),
            Self::PrefixCollision { .. } => None,
        }
    }
}

impl From<IntervalDiagnostic> for MergeError {
    fn from(diagnostic: IntervalDiagnostic) -> Self {
        Self::InvalidInterval(diagnostic)
    }
}

impl From<NameError> for MergeError {
    fn from(err: NameError) -> Self {
        Self::Model(err.into())
    }
}
