//! Project documents
//!
//! A project file is `{ version, columns }` serialized as JSON or YAML. The format
//! is chosen by file extension.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use tcode_model::Column;

/// Document version written by this build
pub const PROJECT_VERSION: u32 = 1;

/// On-disk encoding of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.json`
    Json,

    /// `.yaml` / `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Format for `path`, judged by extension
    ///
    /// # Errors
    /// Returns [`StoreError::UnsupportedFormat`] for any other extension
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Extensions recognized for this format (without dot)
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }
}

impl Display for DocumentFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Serialized project: a version tag and every column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    /// Format version
    pub version: u32,

    /// Columns in project order
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ProjectDocument {
    /// Current-version document holding `columns`
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            version: PROJECT_VERSION,
            columns,
        }
    }

    /// Parse and check a document
    ///
    /// # Errors
    /// Returns error on malformed input, an unknown version, or duplicate
    /// column names
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, StoreError> {
        let doc: Self = match format {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        };
        doc.check()?;
        Ok(doc)
    }

    /// Render in `format`
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn render(&self, format: DocumentFormat) -> Result<String, StoreError> {
        Ok(match format {
            DocumentFormat::Json => {
                let mut text = serde_json::to_string_pretty(self)?;
                text.push('\n');
                text
            }
            DocumentFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.version != PROJECT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                expected: PROJECT_VERSION,
            });
        }
        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.name()) {
                return Err(StoreError::DuplicateColumn(column.name().to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tcode_test_utils::{looking_column, trial_column};

    #[test]
    fn format_from_extension() {
        let fmt = |p: &str| DocumentFormat::from_path(&PathBuf::from(p));
        assert_eq!(fmt("study.json").unwrap(), DocumentFormat::Json);
        assert_eq!(fmt("study.YML").unwrap(), DocumentFormat::Yaml);
        assert_eq!(fmt("dir/study.yaml").unwrap(), DocumentFormat::Yaml);
        assert!(matches!(
            fmt("study.opf"),
            Err(StoreError::UnsupportedFormat(_))
        ));
        assert!(fmt("study").is_err());
    }

    #[test]
    fn json_document_shape() {
        let text = r#"{
            "version": 1,
            "columns": [
                {
                    "name": "trial",
                    "kind": "matrix",
                    "arguments": ["Trial Num"],
                    "cells": [{"ordinal": 1, "onset": 0, "offset": 500, "values": ["1"]}]
                },
                {"name": "note", "kind": "text", "arguments": ["var"]}
            ]
        }"#;
        let doc = ProjectDocument::parse(text, DocumentFormat::Json).unwrap();
        assert_eq!(doc.columns.len(), 2);
        assert_eq!(doc.columns[0].arg_value(0, "trialnum").unwrap(), "1");
        assert!(doc.columns[1].is_empty());
    }

    #[test]
    fn both_formats_reload_identically() {
        let doc = ProjectDocument::new(vec![looking_column(), trial_column()]);
        for format in [DocumentFormat::Json, DocumentFormat::Yaml] {
            let text = doc.render(format).unwrap();
            assert_eq!(ProjectDocument::parse(&text, format).unwrap(), doc);
        }
    }

    #[test]
    fn rejects_unknown_version_and_duplicates() {
        let future = r#"{"version": 2, "columns": []}"#;
        assert!(matches!(
            ProjectDocument::parse(future, DocumentFormat::Json),
            Err(StoreError::UnsupportedVersion { found: 2, .. })
        ));

        let dup = "version: 1\ncolumns:\n  - name: a\n  - name: a\n";
        assert!(matches!(
            ProjectDocument::parse(dup, DocumentFormat::Yaml),
            Err(StoreError::DuplicateColumn(name)) if name == "a"
        ));
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let text = r#"{"version": 1, "columns": [
            {"name": "a", "arguments": ["x"], "cells": [{"ordinal": 1, "onset": 0, "offset": 5, "values": []}]}
        ]}"#;
        let err = ProjectDocument::parse(text, DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
