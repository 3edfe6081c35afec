//! Scripting session
//!
//! [`Session`] binds a column store to a configuration. Every operation names
//! the columns it touches; there is no ambient "current project".

use crate::codes::{check_valid_codes, CodeRule, CodeViolation};
use crate::combine::combine_columns;
use crate::config::ScriptConfig;
use crate::error::ScriptError;
use crate::reliability::{
    check_reliability, make_duration_block_reliability, make_reliability, DurationBlocks,
    ReliabilityReport,
};
use crate::smoothing::smooth_column;
use tcode_model::{Column, Millis};
use tcode_mutex::{MergeOutcome, MutexMerge};
use tcode_store::ColumnStore;

/// Column operations against one store
#[derive(Debug)]
pub struct Session<S: ColumnStore> {
    store: S,
    config: ScriptConfig,
}

impl<S: ColumnStore> Session<S> {
    /// Session over `store` with default configuration
    #[inline]
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, ScriptConfig::default())
    }

    /// Session over `store` with `config`
    #[inline]
    #[must_use]
    pub fn with_config(store: S, config: ScriptConfig) -> Self {
        Self { store, config }
    }

    /// Backing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Release the backing store
    #[inline]
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load column `name`, sorted by onset unless configured otherwise
    ///
    /// Ordinals are reassigned `1..=N` in the returned order.
    ///
    /// # Errors
    /// Returns error if the column does not exist
    pub fn get_column(&self, name: &str) -> Result<Column, ScriptError> {
        let mut column = self.store.load_column(name)?;
        if self.config.sort_on_load {
            column.sort_by_onset();
        }
        column.renumber();
        Ok(column)
    }

    /// Store `column` under its own name
    ///
    /// # Errors
    /// Returns error if the store cannot persist it
    pub fn set_column(&self, column: &Column) -> Result<(), ScriptError> {
        self.store.store_column(column)?;
        tracing::info!(column = column.name(), cells = column.len(), "stored column");
        Ok(())
    }

    /// Rename `column` to `name` and store it
    ///
    /// # Errors
    /// Returns error if the store cannot persist it
    pub fn set_column_as(&self, name: &str, mut column: Column) -> Result<Column, ScriptError> {
        column.set_name(name);
        self.set_column(&column)?;
        Ok(column)
    }

    /// New empty matrix column with `args` (not stored)
    ///
    /// # Errors
    /// Returns error if an argument name is empty or repeated
    pub fn create_column<A: AsRef<str>>(&self, name: &str, args: &[A]) -> Result<Column, ScriptError> {
        Ok(Column::with_arguments(name, args)?)
    }

    /// Remove column `name` from the store
    ///
    /// # Errors
    /// Returns error if the column does not exist
    pub fn delete_column(&self, name: &str) -> Result<Column, ScriptError> {
        let removed = self.store.delete_column(name)?;
        tracing::info!(column = name, "deleted column");
        Ok(removed)
    }

    /// Names of every stored column
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.store.column_names()
    }

    /// Copy of column `name` with `args` appended (not stored)
    ///
    /// # Errors
    /// Returns error if the column is missing, single-valued, or already has an argument
    pub fn add_arguments<A: AsRef<str>>(&self, name: &str, args: &[A]) -> Result<Column, ScriptError> {
        let mut column = self.get_column(name)?;
        for arg in args {
            column.add_argument(arg.as_ref())?;
        }
        Ok(column)
    }

    /// Merge columns `a` and `b` into a new column `name` and store it
    ///
    /// A prefix left as `None` is derived from the source column name.
    ///
    /// # Errors
    /// Returns error if either source is missing or fails validation
    pub fn create_mutually_exclusive(
        &self,
        name: &str,
        a: &str,
        b: &str,
        prefix_a: Option<&str>,
        prefix_b: Option<&str>,
    ) -> Result<MergeOutcome, ScriptError> {
        let mut merge = MutexMerge::new(name);
        if let Some(prefix) = prefix_a {
            merge = merge.with_prefix_a(prefix);
        }
        if let Some(prefix) = prefix_b {
            merge = merge.with_prefix_b(prefix);
        }

        let outcome = merge.merge(self.get_column(a)?, self.get_column(b)?)?;
        self.set_column(&outcome.column)?;
        Ok(outcome)
    }

    /// Build and store reliability column `rel_name` from `source`
    ///
    /// # Errors
    /// Returns error if `source` is missing or `keep` names an unknown argument
    pub fn make_reliability<A: AsRef<str>>(
        &self,
        rel_name: &str,
        source: &str,
        multiple_to_keep: u32,
        keep: &[A],
    ) -> Result<Column, ScriptError> {
        let rel = make_reliability(rel_name, &self.get_column(source)?, multiple_to_keep, keep)?;
        self.set_column(&rel)?;
        Ok(rel)
    }

    /// Build and store an empty reliability column `rel_name` for `source`, plus
    /// its `{rel_name}_blocks` column cut from `binding`
    ///
    /// # Errors
    /// Returns error if a column is missing or `block_ms` / `skip_blocks` is zero
    pub fn make_duration_block_reliability(
        &self,
        rel_name: &str,
        source: &str,
        binding: &str,
        block_ms: Millis,
        skip_blocks: u32,
    ) -> Result<DurationBlocks, ScriptError> {
        let out = make_duration_block_reliability(
            rel_name,
            &self.get_column(source)?,
            &self.get_column(binding)?,
            block_ms,
            skip_blocks,
        )?;
        self.set_column(&out.rel)?;
        self.set_column(&out.blocks)?;
        Ok(out)
    }

    /// Merge every column in `names` into a new column `name` and store it
    ///
    /// # Errors
    /// Returns error if fewer than two names are given, a column is missing, or
    /// a merge fails
    pub fn combine_columns<N: AsRef<str>>(&self, name: &str, names: &[N]) -> Result<Column, ScriptError> {
        let columns = names
            .iter()
            .map(|source| self.get_column(source.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let combined = combine_columns(name, columns)?;
        self.set_column(&combined)?;
        Ok(combined)
    }

    /// Compare `main` with its reliability column `rel`
    ///
    /// `tolerance` defaults to the configured reliability tolerance.
    ///
    /// # Errors
    /// Returns error if a column or argument is missing
    pub fn check_reliability(
        &self,
        main: &str,
        rel: &str,
        match_arg: &str,
        tolerance: Option<Millis>,
    ) -> Result<ReliabilityReport, ScriptError> {
        let tolerance = tolerance.unwrap_or(self.config.reliability_tolerance_ms);
        Ok(check_reliability(
            &self.get_column(main)?,
            &self.get_column(rel)?,
            match_arg,
            tolerance,
        )?)
    }

    /// Check column `name` against code rules
    ///
    /// # Errors
    /// Returns error if the column or a rule's argument is missing
    pub fn check_valid_codes(&self, name: &str, rules: &[CodeRule]) -> Result<Vec<CodeViolation>, ScriptError> {
        Ok(check_valid_codes(&self.get_column(name)?, rules)?)
    }

    /// Smooth column `name` in place and store it
    ///
    /// `tolerance` defaults to the configured smoothing tolerance. Returns the
    /// number of onsets moved.
    ///
    /// # Errors
    /// Returns error if the column is missing or cannot be stored
    pub fn smooth_column(&self, name: &str, tolerance: Option<Millis>) -> Result<usize, ScriptError> {
        let tolerance = tolerance.unwrap_or(self.config.smoothing_tolerance_ms);
        let mut column = self.get_column(name)?;
        let moved = smooth_column(&mut column, tolerance);
        self.set_column(&column)?;
        Ok(moved)
    }
}

/// Copy columns `names` from `from` into `to`, optionally deleting them from `from`
///
/// Every column is loaded before anything is written, and deletion happens only
/// after every copy succeeded.
///
/// # Errors
/// Returns error if a column is missing or a store fails
pub fn transfer_columns<F, T, N>(from: &F, to: &T, names: &[N], remove: bool) -> Result<(), ScriptError>
where
    F: ColumnStore + ?Sized,
    T: ColumnStore + ?Sized,
    N: AsRef<str>,
{
    let columns = names
        .iter()
        .map(|name| from.load_column(name.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    for column in &columns {
        to.store_column(column)?;
    }

    if remove {
        for name in names {
            from.delete_column(name.as_ref())?;
        }
    }

    tracing::info!(count = columns.len(), remove, "transferred columns");
    Ok(())
}
