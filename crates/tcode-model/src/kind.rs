//! Column kinds
//!
//! Defines [`ColumnKind`], the closed set of schema shapes a column may take.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Name of the only argument carried by single-value columns
pub const SINGLE_VALUE_ARG: &str = "var";

/// Shape of a column's schema
///
/// `Text` and `Nominal` columns are the one-argument case of a `Matrix` column:
/// they always carry exactly one argument named [`SINGLE_VALUE_ARG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Any number of named arguments
    #[default]
    Matrix,

    /// Single free-text value
    Text,

    /// Single nominal code
    Nominal,
}

impl ColumnKind {
    /// Whether the schema is fixed to a single `var` argument
    #[inline]
    #[must_use]
    pub fn is_single_value(self) -> bool {
        matches!(self, Self::Text | Self::Nominal)
    }

    /// Whether the schema may gain or lose arguments
    #[inline]
    #[must_use]
    pub fn allows_schema_edits(self) -> bool {
        matches!(self, Self::Matrix)
    }

    /// Stable lowercase identifier
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Text => "text",
            Self::Nominal => "nominal",
        }
    }
}

impl Display for ColumnKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "matrix" => Ok(Self::Matrix),
            "text" => Ok(Self::Text),
            "nominal" => Ok(Self::Nominal),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// Unrecognized column kind identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column kind: {0}")]
pub struct UnknownKind(pub String);
