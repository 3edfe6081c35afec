//! tcode Scripting Session
//!
//! Column operations for coding projects, run against an explicit store.
//!
//! # Core Concepts
//!
//! - [`Session`]: A store plus configuration; loads, stores, merges, and checks columns
//! - [`ScriptConfig`]: Tolerances and load behavior, from TOML
//! - [`make_reliability`] / [`check_reliability`]: Second-coder reliability workflow
//! - [`make_duration_block_reliability`]: Fixed-length recoding blocks over a binding column
//! - [`combine_columns`]: Mutex merge folded over any number of columns
//! - [`check_valid_codes`]: Allowed-value checks per argument
//! - [`smooth_column`]: Close small gaps between consecutive intervals
//! - [`transfer_columns`]: Copy or move columns between stores
//!
//! # Example
//!
//! ```rust
//! use tcode_model::Column;
//! use tcode_script::Session;
//! use tcode_store::MemoryStore;
//!
//! let session = Session::new(MemoryStore::new());
//!
//! let mut gaze = session.create_column("gaze", &["target"])?;
//! gaze.add_interval().set_onset(0).set_offset(400).set_arg("target", "toy")?;
//! session.set_column(&gaze)?;
//! session.set_column(&Column::with_arguments("trial", ["num"])?)?;
//!
//! let outcome = session.create_mutually_exclusive("gaze_trial", "gaze", "trial", None, None)?;
//! assert_eq!(outcome.report.cells_created, 1);
//! assert!(session.column_names().contains(&"gaze_trial".to_string()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod codes;
mod combine;
mod config;
mod error;
mod reliability;
mod session;
mod smoothing;

// Re-exports
pub use codes::{check_valid_codes, CodeRule, CodeViolation};
pub use combine::combine_columns;
pub use config::{ConfigError, ScriptConfig};
pub use error::ScriptError;
pub use reliability::{
    check_reliability, make_duration_block_reliability, make_reliability, Disagreement,
    DurationBlocks, ReliabilityReport, BLOCK_NUM,
};
pub use session::{transfer_columns, Session};
pub use smoothing::smooth_column;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
