//! tcode Column Model
//!
//! Time-coded cells and the named columns that own them.
//!
//! # Core Concepts
//!
//! - [`Interval`]: One cell (ordinal, onset, offset, positional argument values)
//! - [`Column`]: Named, schema-typed sequence of intervals
//! - [`ColumnKind`]: Matrix columns vs. single-value text/nominal columns
//! - [`ArgName`]: Normalized argument identifier
//! - [`Cell`] / [`CellMut`]: Name-based access to one interval's arguments
//!
//! # Example
//!
//! ```rust
//! use tcode_model::Column;
//!
//! let mut trial = Column::with_arguments("trial", ["Trial Num", "Unit"])?;
//! trial
//!     .add_interval()
//!     .set_onset(1_000)
//!     .set_offset(2_500)
//!     .set_arg("trialnum", "1")?;
//! trial.renumber();
//!
//! assert_eq!(trial.arg_value(0, "Trial Num")?, "1");
//! # Ok::<(), tcode_model::ModelError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cell;
mod column;
mod error;
mod interval;
mod kind;
pub mod name;

// Re-exports
pub use cell::{Cell, CellMut};
pub use column::Column;
pub use error::ModelError;
pub use interval::{Interval, Millis};
pub use kind::{ColumnKind, UnknownKind, SINGLE_VALUE_ARG};
pub use name::{column_prefix, normalize_arg_name, ArgName, NameError, PREFIX_SEPARATOR};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
