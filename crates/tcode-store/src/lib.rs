//! tcode Column Stores
//!
//! The load/store collaborator that columns are read from before a merge and
//! written back to afterwards.
//!
//! # Core Concepts
//!
//! - [`ColumnStore`]: Load, store, delete, and list named columns
//! - [`MemoryStore`]: Store held in memory
//! - [`FileStore`]: Store backed by a JSON or YAML project file
//! - [`ProjectDocument`]: Versioned on-disk project shape
//!
//! # Example
//!
//! ```rust
//! use tcode_model::Column;
//! use tcode_store::{ColumnStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.store_column(&Column::with_arguments("trial", ["num"])?)?;
//!
//! let trial = store.load_column("trial")?;
//! assert_eq!(trial.argument_names(), vec!["num"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod document;
mod error;
mod file;
mod memory;
mod store;

// Re-exports
pub use document::{DocumentFormat, ProjectDocument, PROJECT_VERSION};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::ColumnStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
