//! Validation of candidate text against an ordered list of rules.
//!
//! - [`Rule`]: length bounds, regex pattern, or code predicate
//! - [`validate`]: fail-fast evaluation, the commit gate
//! - [`validate_all`]: every failure, for diagnostics

mod engine;
mod rule;

pub use engine::{validate, validate_all, ValidationError, ValidationOutcome};
pub use rule::{PatternRule, PredicateFn, Rule, RuleKind};
