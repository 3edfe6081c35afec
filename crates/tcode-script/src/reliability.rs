//! Reliability coding
//!
//! A reliability column is a thinned, blanked copy of a primary column that a
//! second coder fills in. [`check_reliability`] then compares the two codings.

use crate::error::ScriptError;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};
use tcode_model::{normalize_arg_name, Column, Interval, Millis, ModelError};

/// Pseudo-argument naming the onset
pub const ONSET: &str = "onset";

/// Pseudo-argument naming the offset
pub const OFFSET: &str = "offset";

/// Copy of `source` for reliability coding, named `rel_name`
///
/// Keeps every interval whose 1-based position is a multiple of `multiple_to_keep`
/// and renumbers the kept intervals `1..=N`; a multiple of zero keeps nothing.
/// Onset, offset, and every argument not listed in `keep` are blanked.
///
/// # Errors
/// Returns error if `keep` names an argument the column does not have
pub fn make_reliability<S: AsRef<str>>(
    rel_name: &str,
    source: &Column,
    multiple_to_keep: u32,
    keep: &[S],
) -> Result<Column, ModelError> {
    let mut keep_onset = false;
    let mut keep_offset = false;
    let mut keep_slots = Vec::with_capacity(keep.len());
    for name in keep {
        match normalize_arg_name(name.as_ref()).as_str() {
            ONSET => keep_onset = true,
            OFFSET => keep_offset = true,
            _ => keep_slots.push(source.require_arg(name.as_ref())?),
        }
    }
    let blank_slots: Vec<usize> = (0..source.arg_count())
        .filter(|slot| !keep_slots.contains(slot))
        .collect();

    let mut rel = source.clone();
    rel.set_name(rel_name);
    let mut position = 0u32;
    rel.retain_intervals(|_| {
        position += 1;
        multiple_to_keep != 0 && position % multiple_to_keep == 0
    });

    for interval in rel.intervals_mut() {
        if !keep_onset {
            interval.set_onset(0);
        }
        if !keep_offset {
            interval.set_offset(0);
        }
        for &slot in &blank_slots {
            interval.set_value(slot, "");
        }
    }

    tracing::info!(
        rel = rel_name,
        source = source.name(),
        kept = rel.len(),
        "created reliability column"
    );
    Ok(rel)
}

/// Argument of a block column holding the block number
pub const BLOCK_NUM: &str = "block_num";

/// Output of [`make_duration_block_reliability`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationBlocks {
    /// Empty reliability column with the source schema
    pub rel: Column,

    /// `{rel}_blocks` column marking the stretches to recode
    pub blocks: Column,
}

/// Reliability column plus fixed-length blocks over `binding`
///
/// Every binding interval no longer than `block_ms` becomes one block. A longer
/// one is cut into `duration / block_ms` blocks of `block_ms`, of which every
/// `skip_blocks`-th (starting with the first) is kept; a trailing remainder
/// shorter than a block is dropped. Blocks are numbered `1..` across the
/// whole binding column.
///
/// # Errors
/// Returns error if `block_ms` or `skip_blocks` is zero
pub fn make_duration_block_reliability(
    rel_name: &str,
    source: &Column,
    binding: &Column,
    block_ms: Millis,
    skip_blocks: u32,
) -> Result<DurationBlocks, ScriptError> {
    if block_ms == 0 || skip_blocks == 0 {
        return Err(ScriptError::invalid_rule(format!(
            "block duration and skip count must be positive (got {block_ms} ms, every {skip_blocks})"
        )));
    }
    let none: [&str; 0] = [];
    let rel = make_reliability(rel_name, source, 0, &none)?;

    let step = usize::try_from(skip_blocks).unwrap_or(usize::MAX);
    let mut spans = Vec::new();
    for cell in binding.intervals() {
        let duration = cell.duration();
        if duration <= block_ms {
            spans.push((cell.onset(), cell.offset()));
            continue;
        }
        for i in (0..duration / block_ms).step_by(step) {
            let onset = cell.onset() + i * block_ms;
            spans.push((onset, (onset + block_ms).min(cell.offset())));
        }
    }

    let mut blocks = Column::with_arguments(format!("{rel_name}_blocks"), [BLOCK_NUM])?;
    for (block_num, (onset, offset)) in (1u32..).zip(spans) {
        blocks
            .add_interval()
            .set_onset(onset)
            .set_offset(offset)
            .set_arg(BLOCK_NUM, block_num.to_string())?;
    }

    tracing::info!(
        rel = rel_name,
        binding = binding.name(),
        blocks = blocks.len(),
        "created duration blocks"
    );
    Ok(DurationBlocks { rel, blocks })
}

/// One disagreement between a primary and a reliability interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disagreement {
    /// Ordinal in the primary column
    pub main_ordinal: u32,

    /// Ordinal in the reliability column
    pub rel_ordinal: u32,

    /// Argument, or `onset` / `offset`
    pub field: String,

    /// Primary value
    pub main_value: String,

    /// Reliability value
    pub rel_value: String,
}

/// Result of comparing a primary column with its reliability column
#[derive(Debug, Clone, PartialEq)]
pub struct ReliabilityReport {
    /// Primary column name
    pub main: String,

    /// Reliability column name
    pub rel: String,

    /// Intervals in the reliability column
    pub rel_len: usize,

    /// Error count per field: arguments in schema order, then onset and offset
    pub errors: IndexMap<String, usize>,

    /// Every disagreement found, in primary order
    pub disagreements: Vec<Disagreement>,
}

impl ReliabilityReport {
    /// Agreement percentage for `field`
    ///
    /// `None` if the field is unknown or the reliability column is empty.
    #[must_use]
    pub fn agreement(&self, field: &str) -> Option<f64> {
        let errors = *self.errors.get(field)?;
        if self.rel_len == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = errors as f64 / self.rel_len as f64;
        Some(100.0 * (1.0 - ratio))
    }

    /// Total errors over every field
    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.errors.values().sum()
    }
}

impl Display for ReliabilityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for d in &self.disagreements {
            writeln!(
                f,
                "ERROR in {} at ordinal {}, rel ordinal {} in {}: {}, {}",
                self.main, d.main_ordinal, d.rel_ordinal, d.field, d.main_value, d.rel_value
            )?;
        }
        for (field, errors) in &self.errors {
            match self.agreement(field) {
                Some(pct) => writeln!(f, "Total errors for {field}: {errors}, agreement: {pct:.2}%")?,
                None => writeln!(f, "Total errors for {field}: {errors}, agreement: n/a")?,
            }
        }
        Ok(())
    }
}

/// Compare `main` with `rel`, pairing intervals whose `match_arg` values are equal
///
/// Onset and offset differ when they are at least `tolerance` apart; every
/// argument of `main` is compared by value.
///
/// # Errors
/// Returns error if `match_arg` or an argument of `main` is missing from either column
pub fn check_reliability(
    main: &Column,
    rel: &Column,
    match_arg: &str,
    tolerance: Millis,
) -> Result<ReliabilityReport, ModelError> {
    let main_key = main.require_arg(match_arg)?;
    let rel_key = rel.require_arg(match_arg)?;

    let slots: Vec<(String, usize, usize)> = main
        .arguments()
        .enumerate()
        .map(|(slot, name)| Ok((name.to_string(), slot, rel.require_arg(name.as_str())?)))
        .collect::<Result<_, ModelError>>()?;

    let mut errors: IndexMap<String, usize> =
        slots.iter().map(|(name, _, _)| (name.clone(), 0)).collect();
    errors.insert(ONSET.to_string(), 0);
    errors.insert(OFFSET.to_string(), 0);
    let mut disagreements = Vec::new();

    let mut record = |field: &str, m: &Interval, r: &Interval, mv: String, rv: String| {
        if let Some(count) = errors.get_mut(field) {
            *count += 1;
        }
        disagreements.push(Disagreement {
            main_ordinal: m.ordinal(),
            rel_ordinal: r.ordinal(),
            field: field.to_string(),
            main_value: mv,
            rel_value: rv,
        });
    };

    for m in main.intervals() {
        let key = m.value(main_key).unwrap_or_default();
        for r in rel.intervals().iter().filter(|r| r.value(rel_key).unwrap_or_default() == key) {
            if m.onset().abs_diff(r.onset()) >= tolerance {
                record(ONSET, m, r, m.onset().to_string(), r.onset().to_string());
            }
            if m.offset().abs_diff(r.offset()) >= tolerance {
                record(OFFSET, m, r, m.offset().to_string(), r.offset().to_string());
            }
            for (name, main_slot, rel_slot) in &slots {
                let mv = m.value(*main_slot).unwrap_or_default();
                let rv = r.value(*rel_slot).unwrap_or_default();
                if mv != rv {
                    record(name, m, r, mv.to_string(), rv.to_string());
                }
            }
        }
    }

    let report = ReliabilityReport {
        main: main.name().to_string(),
        rel: rel.name().to_string(),
        rel_len: rel.len(),
        errors,
        disagreements,
    };
    tracing::info!(
        main = %report.main,
        rel = %report.rel,
        errors = report.total_errors(),
        "checked reliability"
    );
    Ok(report)
}
