//! Coded columns
//!
//! Provides [`Column`], a named sequence of [`Interval`]s sharing one argument schema.
//!
//! # Ownership
//! A column exclusively owns its intervals. Cloning a column deep-copies every
//! interval, so no interval is ever shared between two columns.

use crate::cell::{Cell, CellMut};
use crate::error::ModelError;
use crate::interval::{Interval, Millis};
use crate::kind::{ColumnKind, SINGLE_VALUE_ARG};
use crate::name::{normalize_arg_name, ArgName};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Named, schema-typed sequence of intervals
///
/// # Invariants
/// - Argument names are normalized and unique.
/// - Every interval has exactly one value per argument.
/// - Appending, retaining, or removing intervals numbers them by position;
///   sorting leaves ordinals alone until [`renumber`](Self::renumber).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColumnRecord", into = "ColumnRecord")]
pub struct Column {
    name: String,
    kind: ColumnKind,
    args: IndexSet<ArgName>,
    intervals: Vec<Interval>,
}

impl Column {
    /// Create an empty matrix column with no arguments
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Matrix,
            args: IndexSet::new(),
            intervals: Vec::new(),
        }
    }

    /// Declare a matrix column with the given argument names
    ///
    /// Names are normalized in order.
    ///
    /// # Errors
    /// Returns error if a name is empty after normalization or two names collide
    pub fn with_arguments<I, S>(name: impl Into<String>, args: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut column = Self::new(name);
        for arg in args {
            column.insert_arg(ArgName::new(arg.as_ref())?)?;
        }
        Ok(column)
    }

    /// Declare a single-value column (one argument named `var`)
    #[must_use]
    pub fn single(name: impl Into<String>, kind: ColumnKind) -> Self {
        let mut args = IndexSet::with_capacity(1);
        args.insert(ArgName::from_normalized(SINGLE_VALUE_ARG.to_string()));
        Self {
            name: name.into(),
            kind,
            args,
            intervals: Vec::new(),
        }
    }

    /// Assemble a column from already-built parts
    ///
    /// Intervals keep their order and are numbered `1..=N`.
    ///
    /// # Errors
    /// Returns error on duplicate argument names or an interval whose width
    /// disagrees with the schema
    pub fn from_parts(
        name: impl Into<String>,
        kind: ColumnKind,
        args: Vec<ArgName>,
        intervals: Vec<Interval>,
    ) -> Result<Self, ModelError> {
        let mut column = Self::new(name);
        column.kind = kind;
        for arg in args {
            column.insert_arg(arg)?;
        }
        column.intervals.reserve(intervals.len());
        for interval in intervals {
            column.push_interval(interval)?;
        }
        Ok(column)
    }

    fn insert_arg(&mut self, arg: ArgName) -> Result<(), ModelError> {
        if self.args.contains(arg.as_str()) {
            return Err(ModelError::DuplicateArgument {
                column: self.name.clone(),
                name: arg.into(),
            });
        }
        self.args.insert(arg);
        Ok(())
    }

    /// Column name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the column
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Schema kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Argument names in schema order
    #[inline]
    pub fn arguments(&self) -> impl ExactSizeIterator<Item = &ArgName> + '_ {
        self.args.iter()
    }

    /// Argument names as owned strings, in schema order
    #[must_use]
    pub fn argument_names(&self) -> Vec<String> {
        self.args.iter().map(ToString::to_string).collect()
    }

    /// Number of arguments in the schema
    #[inline]
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Schema position of `name`
    ///
    /// The lookup name is normalized first, so `"Trial Num"` finds `trialnum`.
    #[must_use]
    pub fn arg_index(&self, name: &str) -> Option<usize> {
        self.args
            .get_index_of(name)
            .or_else(|| self.args.get_index_of(normalize_arg_name(name).as_str()))
    }

    /// Schema position of `name`, or an [`ModelError::UnknownArgument`]
    ///
    /// # Errors
    /// Returns error if the name is not in the schema
    pub fn require_arg(&self, name: &str) -> Result<usize, ModelError> {
        self.arg_index(name)
            .ok_or_else(|| ModelError::unknown_argument(&self.name, name))
    }

    /// Whether `name` is in the schema
    #[inline]
    #[must_use]
    pub fn has_argument(&self, name: &str) -> bool {
        self.arg_index(name).is_some()
    }

    /// All intervals in current order
    #[inline]
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of intervals
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the column has no intervals
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Interval at position `index`
    #[inline]
    #[must_use]
    pub fn interval(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Read view of the interval at `index`
    #[inline]
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Cell<'_>> {
        self.intervals
            .get(index)
            .map(|interval| Cell::new(self, interval))
    }

    /// Write view of the interval at `index`
    #[inline]
    pub fn cell_mut(&mut self, index: usize) -> Option<CellMut<'_>> {
        let (name, args) = (&self.name, &self.args);
        self.intervals
            .get_mut(index)
            .map(|interval| CellMut::new(name, args, interval))
    }

    /// Read views of every interval, in order
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell<'_>> + '_ {
        self.intervals
            .iter()
            .map(move |interval| Cell::new(self, interval))
    }

    /// Ordinal the next appended interval receives
    fn next_ordinal(&self) -> u32 {
        u32::try_from(self.intervals.len() + 1).unwrap_or(u32::MAX)
    }

    /// Append a zero-valued interval and return a handle to it
    ///
    /// The new interval is numbered with its position.
    pub fn add_interval(&mut self) -> CellMut<'_> {
        let blank = Interval::blank(self.args.len()).with_ordinal(self.next_ordinal());
        self.intervals.push(blank);
        let last = self.intervals.len() - 1;
        let (name, args) = (&self.name, &self.args);
        CellMut::new(name, args, &mut self.intervals[last])
    }

    /// Append an interval built elsewhere, renumbered to its position
    ///
    /// # Errors
    /// Returns error if the interval's width disagrees with the schema
    pub fn push_interval(&mut self, mut interval: Interval) -> Result<(), ModelError> {
        if interval.width() != self.args.len() {
            return Err(ModelError::SchemaMismatch {
                column: self.name.clone(),
                ordinal: self.next_ordinal(),
                expected: self.args.len(),
                found: interval.width(),
            });
        }
        interval.set_ordinal(self.next_ordinal());
        self.intervals.push(interval);
        Ok(())
    }

    /// Remove the interval at `index` and renumber the rest
    ///
    /// # Errors
    /// Returns error if `index` is out of range
    pub fn remove_interval(&mut self, index: usize) -> Result<Interval, ModelError> {
        if index >= self.intervals.len() {
            return Err(ModelError::NoSuchInterval {
                column: self.name.clone(),
                index,
            });
        }
        let removed = self.intervals.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Keep only intervals matching `keep`, then renumber
    pub fn retain_intervals(&mut self, keep: impl FnMut(&Interval) -> bool) {
        self.intervals.retain(keep);
        self.renumber();
    }

    /// Mutable access to every interval, in order
    ///
    /// Interval widths cannot change through this view.
    pub fn intervals_mut(&mut self) -> impl Iterator<Item = &mut Interval> + '_ {
        self.intervals.iter_mut()
    }

    /// Stable sort by onset; ties keep their relative order
    pub fn sort_by_onset(&mut self) {
        self.intervals.sort_by_key(Interval::onset);
    }

    /// Whether onsets are non-decreasing
    #[must_use]
    pub fn is_sorted_by_onset(&self) -> bool {
        self.intervals
            .windows(2)
            .all(|pair| pair[0].onset() <= pair[1].onset())
    }

    /// Reassign ordinals `1..=N` in current order
    pub fn renumber(&mut self) {
        for (ordinal, interval) in (1u32..).zip(self.intervals.iter_mut()) {
            interval.set_ordinal(ordinal);
        }
    }

    /// Value of argument `name` on the interval at `index`
    ///
    /// # Errors
    /// Returns error if the interval or argument does not exist
    pub fn arg_value(&self, index: usize, name: &str) -> Result<&str, ModelError> {
        let slot = self.require_arg(name)?;
        let interval = self.intervals.get(index).ok_or_else(|| ModelError::NoSuchInterval {
            column: self.name.clone(),
            index,
        })?;
        Ok(interval.value(slot).unwrap_or_default())
    }

    /// Set argument `name` on the interval at `index`
    ///
    /// # Errors
    /// Returns error if the interval or argument does not exist
    pub fn set_arg_value(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), ModelError> {
        let slot = self.require_arg(name)?;
        let column = &self.name;
        let interval = self
            .intervals
            .get_mut(index)
            .ok_or_else(|| ModelError::NoSuchInterval {
                column: column.clone(),
                index,
            })?;
        interval.set_value(slot, value);
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), ModelError> {
        if self.kind.allows_schema_edits() {
            Ok(())
        } else {
            Err(ModelError::FixedSchema {
                column: self.name.clone(),
                kind: self.kind,
            })
        }
    }

    /// Append an argument; every interval gains an empty slot
    ///
    /// # Errors
    /// Returns error for single-value columns, empty names, or duplicates
    pub fn add_argument(&mut self, name: &str) -> Result<(), ModelError> {
        self.ensure_editable()?;
        self.insert_arg(ArgName::new(name)?)?;
        for interval in &mut self.intervals {
            interval.push_slot();
        }
        Ok(())
    }

    /// Remove an argument; every interval loses that slot
    ///
    /// Remaining values keep their relative positions.
    ///
    /// # Errors
    /// Returns error for single-value columns or unknown names
    pub fn remove_argument(&mut self, name: &str) -> Result<(), ModelError> {
        self.ensure_editable()?;
        let slot = self.require_arg(name)?;
        self.args.shift_remove_index(slot);
        for interval in &mut self.intervals {
            interval.remove_slot(slot);
        }
        Ok(())
    }

    /// Rename an argument in place, keeping its position and values
    ///
    /// # Errors
    /// Returns error if `old` is unknown or `new` collides with another argument
    pub fn rename_argument(&mut self, old: &str, new: &str) -> Result<(), ModelError> {
        let slot = self.require_arg(old)?;
        let renamed = ArgName::new(new)?;
        if let Some(existing) = self.args.get_index_of(renamed.as_str()) {
            if existing == slot {
                return Ok(());
            }
            return Err(ModelError::DuplicateArgument {
                column: self.name.clone(),
                name: renamed.into(),
            });
        }
        let mut names: Vec<ArgName> = self.args.drain(..).collect();
        names[slot] = renamed;
        self.args = names.into_iter().collect();
        Ok(())
    }

    /// First interval whose closed span contains `time`
    #[must_use]
    pub fn cell_at_time(&self, time: Millis) -> Option<Cell<'_>> {
        self.cells().find(|cell| cell.contains_time(time))
    }

    /// Export row: ordinal, onset, offset, then every value
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<String>> {
        self.intervals.get(index).map(|interval| {
            let mut row = Vec::with_capacity(3 + interval.width());
            row.push(interval.ordinal().to_string());
            row.push(interval.onset().to_string());
            row.push(interval.offset().to_string());
            row.extend(interval.values().iter().cloned());
            row
        })
    }

    /// Export header matching [`Column::row`]
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        ["ordinal", "onset", "offset"]
            .into_iter()
            .map(str::to_string)
            .chain(self.args.iter().map(ToString::to_string))
            .collect()
    }

    /// Tab-separated dump of the whole column, header first
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut out = self.header().join("\t");
        out.push('\n');
        for index in 0..self.intervals.len() {
            if let Some(row) = self.row(index) {
                out.push_str(&row.join("\t"));
                out.push('\n');
            }
        }
        out
    }
}

/// Serialized shape of a column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnRecord {
    name: String,
    #[serde(default)]
    kind: ColumnKind,
    #[serde(default)]
    arguments: Vec<ArgName>,
    #[serde(default)]
    cells: Vec<Interval>,
}

impl TryFrom<ColumnRecord> for Column {
    type Error = ModelError;

    fn try_from(record: ColumnRecord) -> Result<Self, Self::Error> {
        Self::from_parts(record.name, record.kind, record.arguments, record.cells)
    }
}

impl From<Column> for ColumnRecord {
    fn from(column: Column) -> Self {
        Self {
            name: column.name,
            kind: column.kind,
            arguments: column.args.into_iter().collect(),
            cells: column.intervals,
        }
    }
}
