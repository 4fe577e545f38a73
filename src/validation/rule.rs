//! Validation rules.
//!
//! A rule is an immutable, side-effect free check over a candidate text.
//! Evaluating the same rule twice on the same text always yields the same result.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// Predicate function type for code-defined rules
pub type PredicateFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Identifies which kind of rule produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Length,
    Pattern,
    Predicate,
}

/// Expression compiled once by [`Rule::pattern`]
#[derive(Clone)]
pub struct PatternRule {
    expression: String,
    /// `Err` holds the compiler's description for a malformed expression
    compiled: Result<Regex, String>,
    message: String,
}

impl PatternRule {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// False when the expression failed to compile
    pub fn is_valid(&self) -> bool {
        self.compiled.is_ok()
    }

    fn check(&self, text: &str) -> Option<String> {
        match &self.compiled {
            Ok(regex) if regex.is_match(text) => None,
            Ok(_) => Some(self.message.clone()),
            Err(reason) => Some(format!("Invalid pattern {:?}: {}", self.expression, reason)),
        }
    }
}

impl fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("expression", &self.expression)
            .field("valid", &self.is_valid())
            .field("message", &self.message)
            .finish()
    }
}

/// A single validation rule.
#[derive(Clone)]
pub enum Rule {
    /// Character count must fall inside `[min, max]` (either bound optional)
    Length {
        min: Option<usize>,
        max: Option<usize>,
        message: Option<String>,
    },

    /// Text must contain at least one match (non-anchored search)
    Pattern(PatternRule),

    /// Arbitrary check supplied by code
    Predicate {
        message: String,
        evaluate: PredicateFn,
    },
}

impl Rule {
    /// Length rule with both bounds optional
    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Rule::Length {
            min,
            max,
            message: None,
        }
    }

    /// Length rule with only a lower bound
    pub fn min_length(min: usize) -> Self {
        Self::length(Some(min), None)
    }

    /// Length rule with only an upper bound
    pub fn max_length(max: usize) -> Self {
        Self::length(None, Some(max))
    }

    /// Pattern rule. A malformed expression does not fail here; the rule
    /// becomes permanently invalid instead.
    pub fn pattern(expression: impl Into<String>, message: impl Into<String>) -> Self {
        let expression = expression.into();
        let compiled = Regex::new(&expression).map_err(|e| {
            tracing::warn!("Malformed pattern rule {:?}: {}", expression, e);
            e.to_string()
        });
        Rule::Pattern(PatternRule {
            expression,
            compiled,
            message: message.into(),
        })
    }

    /// Predicate rule, invalid iff `evaluate` returns false
    pub fn predicate<F>(message: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Rule::Predicate {
            message: message.into(),
            evaluate: Arc::new(evaluate),
        }
    }

    /// Replace the failure message
    pub fn with_message(self, text: impl Into<String>) -> Self {
        let text = text.into();
        match self {
            Rule::Length { min, max, .. } => Rule::Length {
                min,
                max,
                message: Some(text),
            },
            Rule::Pattern(pattern) => Rule::Pattern(PatternRule {
                message: text,
                ..pattern
            }),
            Rule::Predicate { evaluate, .. } => Rule::Predicate {
                message: text,
                evaluate,
            },
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Length { .. } => RuleKind::Length,
            Rule::Pattern(_) => RuleKind::Pattern,
            Rule::Predicate { .. } => RuleKind::Predicate,
        }
    }

    /// Check `text` against this rule, returning the failure message if it is rejected
    pub fn check(&self, text: &str) -> Option<String> {
        match self {
            Rule::Length { min, max, message } => {
                let count = text.chars().count();
                let too_short = min.is_some_and(|min| count < min);
                let too_long = max.is_some_and(|max| count > max);
                if !too_short && !too_long {
                    return None;
                }
                Some(
                    message
                        .clone()
                        .unwrap_or_else(|| default_length_message(*min, *max)),
                )
            }
            Rule::Pattern(pattern) => pattern.check(text),
            Rule::Predicate { message, evaluate } => {
                if evaluate(text) {
                    None
                } else {
                    Some(message.clone())
                }
            }
        }
    }

    /// True for a pattern rule whose expression failed to compile
    pub fn is_misconfigured(&self) -> bool {
        matches!(self, Rule::Pattern(pattern) if !pattern.is_valid())
    }
}

fn default_length_message(min: Option<usize>, max: Option<usize>) -> String {
    let mut bounds = Vec::with_capacity(2);
    if let Some(min) = min {
        bounds.push(format!("minimum {}", min));
    }
    if let Some(max) = max {
        bounds.push(format!("maximum {}", max));
    }
    format!("Text must be {} characters", bounds.join(", "))
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Length { min, max, message } => f
                .debug_struct("Length")
                .field("min", min)
                .field("max", max)
                .field("message", message)
                .finish(),
            Rule::Pattern(pattern) => pattern.fmt(f),
            Rule::Predicate { message, .. } => f
                .debug_struct("Predicate")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}
