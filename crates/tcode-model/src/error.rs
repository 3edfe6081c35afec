//! Error types for the column model

use crate::kind::ColumnKind;
use crate::name::NameError;

/// Column model error
///
/// Every variant names the column it arose in. A failed operation leaves the
/// column unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Argument name not present in the column schema
    #[error("column '{column}' has no argument '{name}'")]
    UnknownArgument {
        /// Column that was queried
        column: String,
        /// Requested argument name
        name: String,
    },

    /// Argument name already present in the column schema
    #[error("column '{column}' already has argument '{name}'")]
    DuplicateArgument {
        /// Column that was edited
        column: String,
        /// Conflicting (normalized) name
        name: String,
    },

    /// Argument name normalizes to nothing
    #[error(transparent)]
    InvalidArgumentName(#[from] NameError),

    /// Interval index out of range
    #[error("column '{column}' has no interval at index {index}")]
    NoSuchInterval {
        /// Column that was queried
        column: String,
        /// Requested position
        index: usize,
    },

    /// Schema edit on a single-value column
    #[error("column '{column}' is {kind} and its schema cannot change")]
    FixedSchema {
        /// Column that was edited
        column: String,
        /// Kind of the column
        kind: ColumnKind,
    },

    /// Interval value count disagrees with the schema
    #[error("interval {ordinal} in column '{column}' has {found} values, schema has {expected}")]
    SchemaMismatch {
        /// Column being assembled
        column: String,
        /// Ordinal of the offending interval
        ordinal: u32,
        /// Schema width
        expected: usize,
        /// Interval width
        found: usize,
    },
}

impl ModelError {
    /// Create unknown argument error
    #[inline]
    pub fn unknown_argument(column: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownArgument {
            column: column.into(),
            name: name.into(),
        }
    }

    /// Name of the column the error arose in, if any
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::UnknownArgument { column, .. }
            | Self::DuplicateArgument { column, .. }
            | Self::NoSuchInterval { column, .. }
            | Self::FixedSchema { column, .. }
            | Self::SchemaMismatch { column, .. } => Some(column),
            Self::InvalidArgumentName(_) => None,
        }
    }
}
