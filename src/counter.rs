//! Character count figures reported to the host.
//!
//! Only numbers are produced here; any visual threshold is the host's call.

use crate::config::CharacterCountMode;

/// Count data for the current text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCount {
    /// Characters in the text (modes `count` and `both`)
    pub count: Option<usize>,
    /// `max_length - count`, negative once over the limit
    /// (modes `remaining` and `both`, only when a maximum is configured)
    pub remaining: Option<i64>,
}

impl CharacterCount {
    /// Compute the figures for `text`, or None when the mode reports nothing
    pub fn compute(
        text: &str,
        mode: CharacterCountMode,
        max_length: Option<usize>,
    ) -> Option<Self> {
        let (with_count, with_remaining) = match mode {
            CharacterCountMode::None => return None,
            CharacterCountMode::Count => (true, false),
            CharacterCountMode::Remaining => (false, true),
            CharacterCountMode::Both => (true, true),
        };

        let chars = text.chars().count();
        let remaining = if with_remaining {
            max_length.map(|max| {
                let max = i64::try_from(max).unwrap_or(i64::MAX);
                let chars = i64::try_from(chars).unwrap_or(i64::MAX);
                max.saturating_sub(chars)
            })
        } else {
            None
        };

        Some(Self {
            count: with_count.then_some(chars),
            remaining,
        })
    }
}
