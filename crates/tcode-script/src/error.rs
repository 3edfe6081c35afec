//! Session error type

use crate::config::ConfigError;
use tcode_model::ModelError;
use tcode_mutex::MergeError;
use tcode_store::StoreError;

/// Errors raised by session operations
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Column model rejected an operation
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Merge precondition failed
    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),

    /// Store could not load or persist a column
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed utility parameter
    #[error("invalid rule: {0}")]
    InvalidRule(String),
}

impl ScriptError {
    /// Create invalid-rule error
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule(message.into())
    }

    /// Whether the failure is a missing column
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_not_found())
    }
}
