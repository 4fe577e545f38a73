//! Validation engine tests
//!
//! Rule semantics, fail-fast ordering and diagnostics.

use rowedit::validation::RuleKind;
use rowedit::{validate, validate_all, Rule, ValidationOutcome};

fn message(outcome: ValidationOutcome) -> String {
    outcome.error().map(|e| e.message.clone()).unwrap_or_default()
}

// ========================================================================
// Length
// ========================================================================

#[test]
fn test_length_min_and_max() {
    let rules = [Rule::length(Some(3), Some(5))];
    assert!(message(validate("ab", &rules)).contains("minimum 3"));
    assert!(message(validate("abcdef", &rules)).contains("maximum 5"));
    assert_eq!(validate("abc", &rules), ValidationOutcome::Valid);
}

#[test]
fn test_length_unbounded_is_valid() {
    let rules = [Rule::length(None, None)];
    assert!(validate("", &rules).is_valid());
    assert!(validate(&"x".repeat(10_000), &rules).is_valid());
}

// ========================================================================
// Pattern
// ========================================================================

#[test]
fn test_pattern_letters_only() {
    let rules = [Rule::pattern("^[A-Za-z]+$", "letters only")];
    assert_eq!(message(validate("Hello123", &rules)), "letters only");
    assert!(validate("Hello", &rules).is_valid());
}

#[test]
fn test_pattern_matches_anywhere() {
    let rules = [Rule::pattern("@", "needs an at sign")];
    assert!(validate("someone@example.com", &rules).is_valid());
    assert!(!validate("someone.example.com", &rules).is_valid());
}

#[test]
fn test_malformed_pattern_has_distinct_message() {
    let rules = [Rule::pattern("[a-", "custom message")];
    let err = validate("abc", &rules).error().cloned().unwrap();
    assert_eq!(err.rule, RuleKind::Pattern);
    assert!(err.message.starts_with("Invalid pattern"));
    assert!(!err.message.contains("custom message"));
}

// ========================================================================
// Ordering
// ========================================================================

fn abc_rules() -> Vec<Rule> {
    vec![
        Rule::predicate("A", |t| t.contains('a')),
        Rule::predicate("B", |t| t.contains('b')),
        Rule::predicate("C", |t| t.contains('c')),
    ]
}

#[test]
fn test_fail_fast_reports_earliest() {
    // Fails A and C
    let outcome = validate("b", &abc_rules());
    assert_eq!(message(outcome), "A");
}

#[test]
fn test_validate_all_reports_every_failure_in_order() {
    let errors = validate_all("b", &abc_rules());
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["A", "C"]);
    let indices: Vec<usize> = errors.iter().map(|e| e.rule_index).collect();
    assert_eq!(indices, vec![0, 2]);
}

#[test]
fn test_rules_are_deterministic() {
    let rules = abc_rules();
    let first = validate_all("xyz", &rules);
    let second = validate_all("xyz", &rules);
    assert_eq!(first, second);
}
