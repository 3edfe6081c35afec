//! Mutex merge over many columns

use crate::error::ScriptError;
use tcode_model::Column;
use tcode_mutex::MutexMerge;

/// Name of the per-source ordinal argument a merge adds for an unprefixed source
const CARRIED_ORDINAL: &str = "ordinal";

/// Fold a mutually exclusive merge over `columns`, left to right
///
/// The first two columns merge with their derived prefixes. Every later column
/// merges into the running result, whose arguments carry over unprefixed; the
/// result keeps one `{prefix}ordinal` argument per input column.
///
/// # Errors
/// Returns error if fewer than two columns are given, or if any merge fails
pub fn combine_columns<I>(name: &str, columns: I) -> Result<Column, ScriptError>
where
    I: IntoIterator<Item = Column>,
{
    let mut columns = columns.into_iter();
    let (Some(first), Some(second)) = (columns.next(), columns.next()) else {
        return Err(ScriptError::invalid_rule(
            "combining needs at least two columns",
        ));
    };

    let mut combined = MutexMerge::new(name).merge(first, second)?.column;
    let mut merged = 2usize;
    for next in columns {
        combined = MutexMerge::new(name)
            .with_prefix_a("")
            .merge(combined, next)?
            .column;
        combined.remove_argument(CARRIED_ORDINAL)?;
        merged += 1;
    }

    tracing::info!(
        output = name,
        columns = merged,
        cells = combined.len(),
        "combined columns"
    );
    Ok(combined)
}
