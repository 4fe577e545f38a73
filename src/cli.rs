//! Command-line argument parsing for the demo host
//!
//! Supports:
//! - Loading an editing configuration file
//! - Overriding length bounds, auto-save and count mode
//! - Adding pattern rules

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{CharacterCountMode, ConfigError, EditingConfiguration};
use crate::validation::Rule;

/// Edit a single table row from the terminal
#[derive(Parser, Debug)]
#[command(name = "rowedit", version, about = "Edit a table row in place")]
pub struct CliArgs {
    /// Text the row starts with
    #[arg(value_name = "TEXT", default_value = "")]
    pub initial: String,

    /// Editing configuration file (defaults to ~/.config/rowedit/editing.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum length in characters
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Minimum length in characters
    #[arg(long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Auto-save period in milliseconds
    #[arg(long, value_name = "MS")]
    pub auto_save_ms: Option<u64>,

    /// Character count figures to report
    #[arg(long, value_enum)]
    pub count: Option<CountArg>,

    /// Regex the text must contain (repeatable)
    #[arg(long = "pattern", value_name = "REGEX")]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CountArg {
    Remaining,
    Count,
    Both,
}

impl From<CountArg> for CharacterCountMode {
    fn from(arg: CountArg) -> Self {
        match arg {
            CountArg::Remaining => CharacterCountMode::Remaining,
            CountArg::Count => CharacterCountMode::Count,
            CountArg::Both => CharacterCountMode::Both,
        }
    }
}

impl CliArgs {
    /// Resolve the configuration: file (explicit or default) then flag overrides
    pub fn into_config(self) -> Result<EditingConfiguration, ConfigError> {
        let mut config = match &self.config {
            Some(path) => EditingConfiguration::load_from(path)?,
            None => EditingConfiguration::load(),
        };

        if let Some(max) = self.max_length {
            config.max_length = Some(max);
        }
        if let Some(min) = self.min_length {
            config.min_length = Some(min);
        }
        if let Some(ms) = self.auto_save_ms {
            config.auto_save_interval = Some(Duration::from_millis(ms));
        }
        if let Some(count) = self.count {
            config.character_count_mode = count.into();
        }
        for pattern in self.patterns {
            let message = format!("must match {}", pattern);
            config.validation_rules.push(Rule::pattern(pattern, message));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editing.yaml");
        std::fs::write(&path, "max_length: 5\nmin_length: 1\n").unwrap();

        let args = CliArgs::parse_from([
            "rowedit",
            "hello",
            "--config",
            path.to_str().unwrap(),
            "--max-length",
            "12",
            "--auto-save-ms",
            "250",
            "--count",
            "both",
            "--pattern",
            "^[a-z]+$",
        ]);
        assert_eq!(args.initial, "hello");

        let config = args.into_config().unwrap();
        assert_eq!(config.max_length, Some(12));
        assert_eq!(config.min_length, Some(1));
        assert_eq!(config.auto_save_interval, Some(Duration::from_millis(250)));
        assert_eq!(config.character_count_mode, CharacterCountMode::Both);
        assert_eq!(config.validation_rules.len(), 1);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = CliArgs::parse_from(["rowedit", "--config", "/nonexistent/editing.yaml"]);
        assert!(matches!(args.into_config(), Err(ConfigError::Read { .. })));
    }
}
