//! Cell views
//!
//! [`Cell`] and [`CellMut`] pair one interval with its column's schema so arguments
//! can be read and written by name.

use crate::error::ModelError;
use crate::interval::{Interval, Millis};
use crate::name::{normalize_arg_name, ArgName};
use crate::Column;
use indexmap::IndexSet;
use std::ops::Deref;

fn lookup(args: &IndexSet<ArgName>, name: &str) -> Option<usize> {
    args.get_index_of(name)
        .or_else(|| args.get_index_of(normalize_arg_name(name).as_str()))
}

/// Read view of one interval in a column
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    column: &'a Column,
    interval: &'a Interval,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(column: &'a Column, interval: &'a Interval) -> Self {
        Self { column, interval }
    }

    /// Name of the owning column
    #[inline]
    #[must_use]
    pub fn column_name(&self) -> &'a str {
        self.column.name()
    }

    /// Underlying interval
    #[inline]
    #[must_use]
    pub fn interval(&self) -> &'a Interval {
        self.interval
    }

    /// Value of argument `name`
    ///
    /// # Errors
    /// Returns error if `name` is not in the column schema
    pub fn arg(&self, name: &str) -> Result<&'a str, ModelError> {
        let slot = self.column.require_arg(name)?;
        Ok(self.interval.value(slot).unwrap_or_default())
    }

    /// `(name, value)` pairs in schema order
    pub fn named_values(&self) -> impl Iterator<Item = (&'a ArgName, &'a str)> + 'a {
        self.column
            .arguments()
            .zip(self.interval.values().iter().map(String::as_str))
    }
}

impl Deref for Cell<'_> {
    type Target = Interval;

    fn deref(&self) -> &Self::Target {
        self.interval
    }
}

/// Write view of one interval in a column
///
/// Edits go through the schema so value widths never change.
#[derive(Debug)]
pub struct CellMut<'a> {
    column: &'a str,
    args: &'a IndexSet<ArgName>,
    interval: &'a mut Interval,
}

impl<'a> CellMut<'a> {
    pub(crate) fn new(
        column: &'a str,
        args: &'a IndexSet<ArgName>,
        interval: &'a mut Interval,
    ) -> Self {
        Self {
            column,
            args,
            interval,
        }
    }

    /// Set argument `name`
    ///
    /// # Errors
    /// Returns error if `name` is not in the column schema
    pub fn set_arg(&mut self, name: &str, value: impl Into<String>) -> Result<(), ModelError> {
        let slot = lookup(self.args, name)
            .ok_or_else(|| ModelError::unknown_argument(self.column, name))?;
        self.interval.set_value(slot, value);
        Ok(())
    }

    /// Value of argument `name`
    ///
    /// # Errors
    /// Returns error if `name` is not in the column schema
    pub fn arg(&self, name: &str) -> Result<&str, ModelError> {
        let slot = lookup(self.args, name)
            .ok_or_else(|| ModelError::unknown_argument(self.column, name))?;
        Ok(self.interval.value(slot).unwrap_or_default())
    }

    /// Set onset
    #[inline]
    pub fn set_onset(&mut self, onset: Millis) -> &mut Self {
        self.interval.set_onset(onset);
        self
    }

    /// Set offset
    #[inline]
    pub fn set_offset(&mut self, offset: Millis) -> &mut Self {
        self.interval.set_offset(offset);
        self
    }

    /// Set ordinal
    #[inline]
    pub fn set_ordinal(&mut self, ordinal: u32) -> &mut Self {
        self.interval.set_ordinal(ordinal);
        self
    }

    /// Blank every value
    #[inline]
    pub fn clear_values(&mut self) {
        self.interval.clear_values();
    }
}

impl Deref for CellMut<'_> {
    type Target = Interval;

    fn deref(&self) -> &Self::Target {
        self.interval
    }
}
