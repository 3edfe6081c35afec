//! Argument names and column prefixes
//!
//! Provides [`ArgName`], the normalized identifier every column schema is keyed by,
//! plus the helpers used to build prefixed names for merged columns.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Separator appended to a column prefix while a merged schema is being built.
///
/// Collapsed to a single underscore once the merge is complete.
pub const PREFIX_SEPARATOR: &str = "___";

/// Normalized argument name
///
/// Only ASCII-lowercased word characters survive normalization, and a name never
/// starts with a digit.
///
/// # Examples
/// - `"Trial Num"` → `trialnum`
/// - `"2nd-look"` → `_2ndlook`
/// - `"hand_used"` → `hand_used`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArgName(String);

impl ArgName {
    /// Normalize a raw name
    ///
    /// # Errors
    /// Returns error if nothing is left after stripping non-word characters
    pub fn new(raw: &str) -> Result<Self, NameError> {
        let normalized = normalize_arg_name(raw);
        if normalized.is_empty() {
            return Err(NameError::Empty(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Wrap a name that is already normalized
    pub(crate) fn from_normalized(normalized: String) -> Self {
        debug_assert_eq!(normalize_arg_name(&normalized), normalized);
        Self(normalized)
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the name begins with `prefix`
    #[inline]
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Name with every prefix separator collapsed to `_`
    #[inline]
    #[must_use]
    pub fn collapsed(&self) -> Self {
        Self(collapse_separator(&self.0))
    }
}

impl Display for ArgName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ArgName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ArgName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ArgName> for String {
    fn from(name: ArgName) -> Self {
        name.0
    }
}

impl Borrow<str> for ArgName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArgName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ArgName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ArgName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Whether `c` survives normalization
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Normalize an argument name
///
/// Strips every non-word character, lowercases, and escapes a leading digit with `_`.
/// May return an empty string; use [`ArgName::new`] to reject that case.
#[must_use]
pub fn normalize_arg_name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| is_word_char(*c))
        .flat_map(char::to_lowercase)
        .collect();

    if stripped.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{stripped}")
    } else {
        stripped
    }
}

/// Default argument prefix for a column in a merged schema
///
/// Column names are stripped and lowercased but not digit-escaped; the separator
/// [`PREFIX_SEPARATOR`] is appended.
#[must_use]
pub fn column_prefix(column_name: &str) -> String {
    let mut prefix: String = column_name
        .chars()
        .filter(|c| is_word_char(*c))
        .flat_map(char::to_lowercase)
        .collect();
    prefix.push_str(PREFIX_SEPARATOR);
    prefix
}

/// Replace every [`PREFIX_SEPARATOR`] with a single underscore
#[inline]
#[must_use]
pub fn collapse_separator(name: &str) -> String {
    name.replace(PREFIX_SEPARATOR, "_")
}

/// Errors related to argument names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Name normalizes to nothing
    #[error("argument name '{0}' has no word characters")]
    Empty(String),
}
