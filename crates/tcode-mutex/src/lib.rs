//! tcode Mutex Merge
//!
//! Mutually exclusive merge of two time-coded columns into one partition of their
//! combined timeline.
//!
//! # Core Concepts
//!
//! - [`MutexMerge`]: Merge builder and engine
//! - [`BoundarySet`]: Sorted distinct onsets and offsets of both inputs
//! - [`Slice`]: Half-open range between consecutive boundary points
//! - [`ActiveCellLocator`]: Forward-only search for the interval covering a slice
//! - [`MergedLayout`]: Output schema resolved to source slots
//! - [`scan_for_bad_cells`]: Precondition scan over an input column
//!
//! # Example
//!
//! ```rust
//! use tcode_model::Column;
//! use tcode_mutex::MutexMerge;
//!
//! let mut gaze = Column::with_arguments("gaze", ["target"])?;
//! gaze.add_interval().set_onset(0).set_offset(5).set_arg("target", "toy")?;
//! gaze.add_interval().set_onset(10).set_offset(15).set_arg("target", "mom")?;
//!
//! let outcome = MutexMerge::new("gaze_by_trial").merge(gaze, Column::new("trial"))?;
//!
//! // The gap between 5 and 10 is not covered
//! assert_eq!(outcome.column.len(), 2);
//! assert_eq!(outcome.column.arg_value(1, "gaze_target")?, "mom");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod boundary;
mod engine;
mod error;
mod layout;
mod locator;
mod validation;

// Re-exports
pub use boundary::{BoundarySet, Slice};
pub use engine::{MergeOutcome, MergeReport, MutexMerge};
pub use error::{IntervalDiagnostic, IntervalFault, MergeError};
pub use layout::{MergedLayout, Slot, Source};
pub use locator::ActiveCellLocator;
pub use validation::{
    check_fault, ensure_valid, later_overlapping_cells, scan_for_bad_cells, validate_pair,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
