//! Rule evaluation. Pure functions, no state.

use std::fmt;

use super::rule::{Rule, RuleKind};

/// A rule rejected the candidate text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Position of the failing rule in the evaluated list
    pub rule_index: usize,
    pub rule: RuleKind,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result of fail-fast validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(e) => Err(e),
        }
    }
}

fn evaluate(index: usize, rule: &Rule, text: &str) -> Option<ValidationError> {
    rule.check(text).map(|message| ValidationError {
        rule_index: index,
        rule: rule.kind(),
        message,
    })
}

/// Evaluate `rules` in order and stop at the first failure.
///
/// Used as the authoritative gate for commits: when several rules fail,
/// only the earliest registered one is reported.
pub fn validate<'a, I>(text: &str, rules: I) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a Rule>,
{
    rules
        .into_iter()
        .enumerate()
        .find_map(|(i, rule)| evaluate(i, rule, text))
        .map_or(ValidationOutcome::Valid, ValidationOutcome::Invalid)
}

/// Evaluate every rule and collect all failures in registration order.
///
/// Diagnostics only; never used to gate a commit.
pub fn validate_all<'a, I>(text: &str, rules: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = &'a Rule>,
{
    rules
        .into_iter()
        .enumerate()
        .filter_map(|(i, rule)| evaluate(i, rule, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<Rule> {
        vec![
            Rule::min_length(3).with_message("A"),
            Rule::pattern("x", "B"),
            Rule::predicate("C", |t| t.starts_with('z')),
        ]
    }

    #[test]
    fn test_empty_rule_list_is_valid() {
        let none: Vec<Rule> = Vec::new();
        assert_eq!(validate("anything", &none), ValidationOutcome::Valid);
        assert!(validate_all("anything", &none).is_empty());
    }

    #[test]
    fn test_validate_reports_first_failure_only() {
        // "ax" fails A and C, passes B
        let outcome = validate("ax", &rules());
        let err = outcome.error().unwrap();
        assert_eq!(err.message, "A");
        assert_eq!(err.rule_index, 0);
        assert_eq!(err.rule, RuleKind::Length);
    }

    #[test]
    fn test_validate_all_preserves_order() {
        let errors = validate_all("ax", &rules());
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["A", "C"]);
        assert_eq!(errors[1].rule_index, 2);
    }

    #[test]
    fn test_all_rules_pass() {
        assert!(validate("zzx", &rules()).is_valid());
    }

    #[test]
    fn test_into_result() {
        assert!(validate("zzx", &rules()).into_result().is_ok());
        let err = validate("", &rules()).into_result().unwrap_err();
        assert_eq!(err.to_string(), "A");
    }
}
