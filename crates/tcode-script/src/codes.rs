//! Valid-code checks
//!
//! A [`CodeRule`] lists the values one argument may take; [`check_valid_codes`]
//! reports every interval that breaks a rule.

use crate::error::ScriptError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use tcode_model::{Column, ModelError};

/// Allowed values for one argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRule {
    /// Argument name
    pub argument: String,

    /// Allowed values (exact match; the empty string must be listed to allow blanks)
    pub allowed: Vec<String>,
}

impl CodeRule {
    /// Rule for `argument`
    pub fn new<I, S>(argument: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argument: argument.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `value` is allowed
    #[inline]
    #[must_use]
    pub fn allows(&self, value: &str) -> bool {
        self.allowed.iter().any(|a| a == value)
    }
}

impl FromStr for CodeRule {
    type Err = ScriptError;

    /// Parse `arg=code1,code2,...`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (argument, codes) = s
            .split_once('=')
            .ok_or_else(|| ScriptError::invalid_rule(format!("'{s}' is not of the form arg=a,b,c")))?;
        let argument = argument.trim();
        if argument.is_empty() {
            return Err(ScriptError::invalid_rule(format!("'{s}' has no argument name")));
        }
        Ok(Self::new(argument, codes.split(',').map(str::trim)))
    }
}

/// One value that no rule allows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeViolation {
    /// Column checked
    pub column: String,

    /// Ordinal of the offending interval
    pub ordinal: u32,

    /// Argument holding the value
    pub argument: String,

    /// Offending value
    pub value: String,
}

impl Display for CodeViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code error: column {}\tordinal {}\targ {}\tvalue '{}'",
            self.column, self.ordinal, self.argument, self.value
        )
    }
}

/// Check every interval of `column` against every rule
///
/// # Errors
/// Returns error if a rule names an argument the column does not have
pub fn check_valid_codes(column: &Column, rules: &[CodeRule]) -> Result<Vec<CodeViolation>, ModelError> {
    let resolved: Vec<(usize, &CodeRule)> = rules
        .iter()
        .map(|rule| Ok((column.require_arg(&rule.argument)?, rule)))
        .collect::<Result<_, ModelError>>()?;

    let mut violations = Vec::new();
    for interval in column.intervals() {
        for (slot, rule) in &resolved {
            let value = interval.value(*slot).unwrap_or_default();
            if !rule.allows(value) {
                violations.push(CodeViolation {
                    column: column.name().to_string(),
                    ordinal: interval.ordinal(),
                    argument: rule.argument.clone(),
                    value: value.to_string(),
                });
            }
        }
    }

    if violations.is_empty() {
        tracing::info!(column = column.name(), "no code errors found");
    } else {
        tracing::warn!(column = column.name(), count = violations.len(), "code errors found");
    }
    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcode_test_utils::looking_column;

    #[test]
    fn parse_rule() {
        let rule: CodeRule = "hand = l, r ,b".parse().unwrap();
        assert_eq!(rule, CodeRule::new("hand", ["l", "r", "b"]));
        assert!("hand".parse::<CodeRule>().is_err());
        assert!("=l,r".parse::<CodeRule>().is_err());

        let with_blank: CodeRule = "hand=l,".parse().unwrap();
        assert!(with_blank.allows(""));
    }

    #[test]
    fn reports_each_bad_value() {
        let rules = [
            CodeRule::new("target", ["toy"]),
            CodeRule::new("hand", ["left", "right"]),
        ];
        let violations = check_valid_codes(&looking_column(), &rules).unwrap();

        let found: Vec<_> = violations
            .iter()
            .map(|v| (v.ordinal, v.argument.as_str(), v.value.as_str()))
            .collect();
        assert_eq!(found, vec![(2, "target", "mom"), (2, "hand", "")]);
        assert!(violations[0].to_string().contains("value 'mom'"));
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let rules = [CodeRule::new("nope", ["x"])];
        assert!(check_valid_codes(&looking_column(), &rules).is_err());
    }
}
