//! Column store contract

use crate::error::StoreError;
use std::fmt::Debug;
use tcode_model::Column;

/// Collaborator that loads and persists named columns
///
/// Implementations use interior mutability so a store can be shared behind `&`.
pub trait ColumnStore: Send + Sync + Debug {
    /// Fetch a deep copy of the column stored under `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no such column exists
    fn load_column(&self, name: &str) -> Result<Column, StoreError>;

    /// Persist `column` under its own name, replacing any prior state
    ///
    /// # Errors
    /// Returns error if the backing medium cannot be written
    fn store_column(&self, column: &Column) -> Result<(), StoreError>;

    /// Remove and return the column stored under `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no such column exists
    fn delete_column(&self, name: &str) -> Result<Column, StoreError>;

    /// Stored column names in insertion order
    fn column_names(&self) -> Vec<String>;

    /// Whether a column is stored under `name`
    fn contains(&self, name: &str) -> bool {
        self.column_names().iter().any(|n| n == name)
    }
}

impl<S: ColumnStore + ?Sized> ColumnStore for &S {
    fn load_column(&self, name: &str) -> Result<Column, StoreError> {
        (**self).load_column(name)
    }

    fn store_column(&self, column: &Column) -> Result<(), StoreError> {
        (**self).store_column(column)
    }

    fn delete_column(&self, name: &str) -> Result<Column, StoreError> {
        (**self).delete_column(name)
    }

    fn column_names(&self) -> Vec<String> {
        (**self).column_names()
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }
}
