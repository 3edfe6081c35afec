//! Store error types

use std::path::PathBuf;
use tcode_model::ModelError;

/// Errors raised by column stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No column stored under this name
    #[error("column not found: '{0}'")]
    NotFound(String),

    /// IO failure on a project file
    #[error("io error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON document
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML document
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension maps to no known format
    #[error("unsupported project format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Document version this build cannot read
    #[error("unsupported project version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version in the document
        found: u32,
        /// Version this build writes
        expected: u32,
    },

    /// Two columns in one document share a name
    #[error("duplicate column in project: '{0}'")]
    DuplicateColumn(String),

    /// Column model rejected the data
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Whether the error means the column does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
