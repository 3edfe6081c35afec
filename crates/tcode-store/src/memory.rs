//! In-memory column store

use crate::error::StoreError;
use crate::store::ColumnStore;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tcode_model::Column;

/// Column store held entirely in memory
///
/// Columns are deep-copied on the way in and out, so callers never share an
/// interval with the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    columns: RwLock<IndexMap<String, Column>>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store holding `columns`
    ///
    /// A later column replaces an earlier one of the same name.
    #[must_use]
    pub fn with_columns(columns: impl IntoIterator<Item = Column>) -> Self {
        let map = columns
            .into_iter()
            .map(|column| (column.name().to_string(), column))
            .collect();
        Self {
            columns: RwLock::new(map),
        }
    }

    /// Number of stored columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.read().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.read().is_empty()
    }

    /// Copy of every stored column in insertion order
    #[must_use]
    pub fn snapshot(&self) -> Vec<Column> {
        self.columns.read().values().cloned().collect()
    }
}

impl ColumnStore for MemoryStore {
    fn load_column(&self, name: &str) -> Result<Column, StoreError> {
        self.columns
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(name))
    }

    fn store_column(&self, column: &Column) -> Result<(), StoreError> {
        tracing::debug!(column = column.name(), cells = column.len(), "storing column");
        self.columns
            .write()
            .insert(column.name().to_string(), column.clone());
        Ok(())
    }

    fn delete_column(&self, name: &str) -> Result<Column, StoreError> {
        self.columns
            .write()
            .shift_remove(name)
            .ok_or_else(|| StoreError::not_found(name))
    }

    fn column_names(&self) -> Vec<String> {
        self.columns.read().keys().cloned().collect()
    }

    fn contains(&self, name: &str) -> bool {
        self.columns.read().contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcode_test_utils::{looking_column, trial_column};

    #[test]
    fn store_then_load_is_a_deep_copy() {
        let store = MemoryStore::new();
        let mut column = looking_column();
        store.store_column(&column).unwrap();

        column.set_arg_value(0, "target", "changed").unwrap();
        let loaded = store.load_column("looking").unwrap();
        assert_eq!(loaded.arg_value(0, "target").unwrap(), "toy");
    }

    #[test]
    fn store_replaces_in_place() {
        let store = MemoryStore::with_columns([looking_column(), trial_column()]);
        let mut trial = trial_column();
        trial.remove_interval(0).unwrap();
        store.store_column(&trial).unwrap();

        assert_eq!(store.column_names(), vec!["looking", "trial"]);
        assert_eq!(store.load_column("trial").unwrap().len(), 1);
    }

    #[test]
    fn delete_and_missing() {
        let store = MemoryStore::with_columns([looking_column()]);
        let removed = store.delete_column("looking").unwrap();
        assert_eq!(removed.name(), "looking");
        assert!(store.is_empty());
        assert!(store.load_column("looking").unwrap_err().is_not_found());
        assert!(store.delete_column("looking").unwrap_err().is_not_found());
    }

    #[test]
    fn shared_reference_is_a_store() {
        fn count<S: ColumnStore>(store: S) -> usize {
            store.column_names().len()
        }
        let store = MemoryStore::with_columns([looking_column(), trial_column()]);
        assert_eq!(count(&store), 2);
        assert!((&store).contains("trial"));
    }
}
