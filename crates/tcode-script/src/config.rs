//! Session configuration
//!
//! Loaded from TOML; every field has a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tcode_model::Millis;

/// Tunables shared by session operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Largest gap (ms) closed by smoothing
    pub smoothing_tolerance_ms: Millis,

    /// Onset/offset difference (ms) counted as a reliability error
    pub reliability_tolerance_ms: Millis,

    /// Sort columns by onset when they are loaded
    pub sort_on_load: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            smoothing_tolerance_ms: 33,
            reliability_tolerance_ms: 100,
            sort_on_load: true,
        }
    }
}

impl ScriptConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns error on malformed TOML or unknown keys
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// With smoothing tolerance
    #[inline]
    #[must_use]
    pub fn with_smoothing_tolerance(mut self, ms: Millis) -> Self {
        self.smoothing_tolerance_ms = ms;
        self
    }

    /// With reliability tolerance
    #[inline]
    #[must_use]
    pub fn with_reliability_tolerance(mut self, ms: Millis) -> Self {
        self.reliability_tolerance_ms = ms;
        self
    }

    /// With sort-on-load
    #[inline]
    #[must_use]
    pub fn with_sort_on_load(mut self, sort: bool) -> Self {
        self.sort_on_load = sort;
        self
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
