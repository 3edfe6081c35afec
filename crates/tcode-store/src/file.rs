//! Project-file column store

use crate::document::{DocumentFormat, ProjectDocument};
use crate::error::StoreError;
use crate::store::ColumnStore;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tcode_model::Column;

/// Column store backed by one JSON or YAML project file
///
/// Columns are cached in memory; every store or delete rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    format: DocumentFormat,
    columns: RwLock<IndexMap<String, Column>>,
}

impl FileStore {
    /// Open `path`, starting empty if the file does not exist yet
    ///
    /// # Errors
    /// Returns error for an unsupported extension, an unreadable file, or a
    /// malformed document
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;

        let document = match fs::read_to_string(&path) {
            Ok(text) => ProjectDocument::parse(&text, format)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "project file missing, starting empty");
                ProjectDocument::default()
            }
            Err(err) => return Err(StoreError::io_error(path, err)),
        };

        tracing::debug!(
            path = %path.display(),
            %format,
            columns = document.columns.len(),
            "opened project"
        );

        let columns = document
            .columns
            .into_iter()
            .map(|column| (column.name().to_string(), column))
            .collect();

        Ok(Self {
            path,
            format,
            columns: RwLock::new(columns),
        })
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encoding of the backing file
    #[inline]
    #[must_use]
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Write the current columns to the backing file
    ///
    /// # Errors
    /// Returns error if rendering or writing fails
    pub fn flush(&self) -> Result<(), StoreError> {
        let columns = self.columns.read();
        Self::write(&self.path, self.format, &columns)
    }

    fn write(
        path: &Path,
        format: DocumentFormat,
        columns: &IndexMap<String, Column>,
    ) -> Result<(), StoreError> {
        let document = ProjectDocument::new(columns.values().cloned().collect());
        let text = document.render(format)?;
        fs::write(path, text).map_err(|err| StoreError::io_error(path, err))?;
        tracing::debug!(path = %path.display(), columns = columns.len(), "wrote project");
        Ok(())
    }
}

impl ColumnStore for FileStore {
    fn load_column(&self, name: &str) -> Result<Column, StoreError> {
        self.columns
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(name))
    }

    fn store_column(&self, column: &Column) -> Result<(), StoreError> {
        let mut columns = self.columns.write();
        let previous = columns.insert(column.name().to_string(), column.clone());
        if let Err(err) = Self::write(&self.path, self.format, &columns) {
            match previous {
                Some(prev) => {
                    columns.insert(column.name().to_string(), prev);
                }
                None => {
                    columns.shift_remove(column.name());
                }
            }
            return Err(err);
        }
        Ok(())
    }

    fn delete_column(&self, name: &str) -> Result<Column, StoreError> {
        let mut columns = self.columns.write();
        let index = columns
            .get_index_of(name)
            .ok_or_else(|| StoreError::not_found(name))?;
        let (key, removed) = columns
            .shift_remove_index(index)
            .ok_or_else(|| StoreError::not_found(name))?;
        if let Err(err) = Self::write(&self.path, self.format, &columns) {
            columns.shift_insert(index, key, removed);
            return Err(err);
        }
        Ok(removed)
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
    use tcode_test_utils::looking_column;

    #[test]
    fn missing_file_starts_empty_and_is_created_on_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.json");

        let store = FileStore::open(&path).unwrap();
        assert!(store.column_names().is_empty());
        assert!(!path.exists());

        store.store_column(&looking_column()).unwrap();
        assert!(path.exists());
        assert_eq!(store.format(), DocumentFormat::Json);
    }

    #[test]
    fn unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileStore::open(dir.path().join("study.opf")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFormat(_)));
    }

    #[test]
    fn malformed_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "version: [not a number").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::Yaml(_))));
    }
}
