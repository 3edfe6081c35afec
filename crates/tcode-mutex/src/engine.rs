//! Mutex merge engine
//!
//! Combines two columns into one partition of their shared timeline. Each output
//! cell covers one slice between consecutive boundary points and carries the
//! arguments of whichever source intervals were active over it.

use crate::boundary::BoundarySet;
use crate::error::MergeError;
use crate::layout::MergedLayout;
use crate::locator::ActiveCellLocator;
use crate::validation::validate_pair;
use tcode_model::{column_prefix, Column, ColumnKind};

/// Counters collected during one merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Distinct boundary points
    pub boundaries: usize,

    /// Slices swept
    pub slices: usize,

    /// Output cells created
    pub cells_created: usize,

    /// Cells covered only by the first column
    pub a_only: usize,

    /// Cells covered only by the second column
    pub b_only: usize,

    /// Cells covered by both columns
    pub both: usize,

    /// Slices covered by neither column
    pub gaps: usize,

    /// Source intervals inspected by both locators
    pub candidates_touched: usize,
}

/// Output of a successful merge
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Merged column, ordinals `1..=N`
    pub column: Column,

    /// Sweep counters
    pub report: MergeReport,
}

/// Mutually exclusive merge of two columns
///
/// # Example
///
/// ```rust
/// use tcode_model::Column;
/// use tcode_mutex::MutexMerge;
///
/// let mut a = Column::with_arguments("a", ["x"])?;
/// a.add_interval().set_onset(0).set_offset(10).set_arg("x", "a")?;
/// let mut b = Column::with_arguments("b", ["y"])?;
/// b.add_interval().set_onset(5).set_offset(15).set_arg("y", "b")?;
///
/// let outcome = MutexMerge::new("ab").merge(a, b)?;
/// assert_eq!(outcome.report.cells_created, 3);
/// assert_eq!(outcome.column.arg_value(1, "b_y")?, "b");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutexMerge {
    name: String,
    prefix_a: Option<String>,
    prefix_b: Option<String>,
}

impl MutexMerge {
    /// Merge producing a column called `name`
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix_a: None,
            prefix_b: None,
        }
    }

    /// Use `prefix` verbatim for arguments of the first column
    #[inline]
    #[must_use]
    pub fn with_prefix_a(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_a = Some(prefix.into());
        self
    }

    /// Use `prefix` verbatim for arguments of the second column
    #[inline]
    #[must_use]
    pub fn with_prefix_b(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_b = Some(prefix.into());
        self
    }

    /// Output column name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefixes applied to `a` and `b`
    ///
    /// A prefix left unset is derived from the column name.
    #[must_use]
    pub fn prefixes_for(&self, a: &Column, b: &Column) -> (String, String) {
        let pick = |custom: &Option<String>, column: &Column| {
            custom
                .clone()
                .unwrap_or_else(|| column_prefix(column.name()))
        };
        (pick(&self.prefix_a, a), pick(&self.prefix_b, b))
    }

    /// Merge `a` and `b`, consuming both
    ///
    /// Both sources are stably sorted by onset and renumbered first, so
    /// diagnostics and the merged `ordinal` arguments report onset rank.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidInterval`] if either column holds an inverted
    /// interval or an unset offset, and [`MergeError::PrefixCollision`] if the
    /// output schema would repeat a name. Nothing is built on failure.
    pub fn merge(&self, mut a: Column, mut b: Column) -> Result<MergeOutcome, MergeError> {
        for source in [&mut a, &mut b] {
            source.sort_by_onset();
            source.renumber();
        }

        validate_pair(&a, &b)?;

        let (prefix_a, prefix_b) = self.prefixes_for(&a, &b);
        let layout = MergedLayout::build(&a, &b, &prefix_a, &prefix_b)?;

        let boundaries = BoundarySet::from_columns(&a, &b);
        tracing::info!(
            output = %self.name,
            a = a.name(),
            b = b.name(),
            boundaries = boundaries.len(),
            "starting mutex merge"
        );

        let mut report = MergeReport {
            boundaries: boundaries.len(),
            slices: boundaries.slice_count(),
            ..MergeReport::default()
        };

        let mut intervals = Vec::with_capacity(report.slices);
        let mut in_a = ActiveCellLocator::for_column(&a);
        let mut in_b = ActiveCellLocator::for_column(&b);

        for slice in boundaries.slices() {
            let active_a = in_a.locate(slice);
            let active_b = in_b.locate(slice);

            match (active_a, active_b) {
                (None, None) => {
                    report.gaps += 1;
                    continue;
                }
                (Some(_), None) => report.a_only += 1,
                (None, Some(_)) => report.b_only += 1,
                (Some(_), Some(_)) => report.both += 1,
            }
            intervals.push(layout.fill(active_a, active_b, slice));
        }

        report.cells_created = intervals.len();
        report.candidates_touched = in_a.candidates_touched() + in_b.candidates_touched();

        let column = Column::from_parts(
            self.name.clone(),
            ColumnKind::Matrix,
            layout.names().to_vec(),
            intervals,
        )?;

        tracing::debug!(?report, "mutex sweep statistics");
        tracing::info!(
            output = %self.name,
            cells = report.cells_created,
            "created merged column"
        );

        Ok(MergeOutcome { column, report })
    }

    /// Merge copies of `a` and `b`
    ///
    /// # Errors
    /// Same as [`merge`](Self::merge)
    pub fn merge_ref(&self, a: &Column, b: &Column) -> Result<MergeOutcome, MergeError> {
        self.merge(a.clone(), b.clone())
    }
}
