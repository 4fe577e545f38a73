//! Editing configuration
//!
//! Captured immutably when a session begins. Hosts can keep defaults in
//! `~/.config/rowedit/editing.yaml`.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::validation::Rule;

/// Which character-count figures are reported to the host while editing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterCountMode {
    #[default]
    None,
    /// Characters left before `max_length`
    Remaining,
    /// Characters typed so far
    Count,
    Both,
}

/// Per-session editing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct EditingConfiguration {
    pub is_editing_enabled: bool,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    /// Period of the auto-save timer (None = no auto-save)
    pub auto_save_interval: Option<Duration>,
    pub character_count_mode: CharacterCountMode,
    pub dynamic_height_enabled: bool,
    /// Rules evaluated in order after the `min_length`/`max_length` bounds
    pub validation_rules: Vec<Rule>,
}

impl Default for EditingConfiguration {
    fn default() -> Self {
        Self {
            is_editing_enabled: true,
            max_length: None,
            min_length: None,
            auto_save_interval: None,
            character_count_mode: CharacterCountMode::None,
            dynamic_height_enabled: false,
            validation_rules: Vec::new(),
        }
    }
}

impl EditingConfiguration {
    /// Configuration with editing switched off
    pub fn disabled() -> Self {
        Self {
            is_editing_enabled: false,
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_auto_save(mut self, interval: Duration) -> Self {
        self.auto_save_interval = Some(interval);
        self
    }

    pub fn with_character_count(mut self, mode: CharacterCountMode) -> Self {
        self.character_count_mode = mode;
        self
    }

    pub fn with_dynamic_height(mut self, enabled: bool) -> Self {
        self.dynamic_height_enabled = enabled;
        self
    }

    /// Append a rule after those already registered
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    /// Auto-save interval if set and non-zero
    pub fn effective_auto_save_interval(&self) -> Option<Duration> {
        self.auto_save_interval.filter(|d| !d.is_zero())
    }

    /// Rules a commit is checked against: the implicit length bound first,
    /// then the registered rules in order.
    pub fn effective_rules(&self) -> Vec<Rule> {
        let mut rules = Vec::with_capacity(self.validation_rules.len() + 1);
        if self.min_length.is_some() || self.max_length.is_some() {
            rules.push(Rule::length(self.min_length, self.max_length));
        }
        rules.extend(self.validation_rules.iter().cloned());
        rules
    }

    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Read and parse a YAML file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load config from the user config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded editing config from {}", path.display());
                config
            }
            Err(e) => {
                match e.source() {
                    Some(cause) => tracing::warn!("{}: {}, using defaults", e, cause),
                    None => tracing::warn!("{}, using defaults", e),
                }
                Self::default()
            }
        }
    }
}

/// Errors from reading a configuration file
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, .. } => write!(f, "Failed to read config at {}", path.display()),
            Self::Parse(_) => write!(f, "Failed to parse config"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(source) => Some(source),
        }
    }
}

/// On-disk form. Only data rules can be expressed here; predicates are code-only.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    editing_enabled: bool,
    max_length: Option<usize>,
    min_length: Option<usize>,
    auto_save_interval_ms: Option<u64>,
    character_count: CharacterCountMode,
    dynamic_height: bool,
    rules: Vec<RuleSpec>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            editing_enabled: true,
            max_length: None,
            min_length: None,
            auto_save_interval_ms: None,
            character_count: CharacterCountMode::None,
            dynamic_height: false,
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RuleSpec {
    Length {
        min: Option<usize>,
        max: Option<usize>,
        message: Option<String>,
    },
    Pattern {
        expression: String,
        message: String,
    },
}

impl From<RuleSpec> for Rule {
    fn from(spec: RuleSpec) -> Self {
        match spec {
            RuleSpec::Length { min, max, message } => {
                let rule = Rule::length(min, max);
                match message {
                    Some(message) => rule.with_message(message),
                    None => rule,
                }
            }
            RuleSpec::Pattern {
                expression,
                message,
            } => Rule::pattern(expression, message),
        }
    }
}

impl From<ConfigFile> for EditingConfiguration {
    fn from(file: ConfigFile) -> Self {
        Self {
            is_editing_enabled: file.editing_enabled,
            max_length: file.max_length,
            min_length: file.min_length,
            auto_save_interval: file.auto_save_interval_ms.map(Duration::from_millis),
            character_count_mode: file.character_count,
            dynamic_height_enabled: file.dynamic_height,
            validation_rules: file.rules.into_iter().map(Rule::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RuleKind;

    #[test]
    fn test_default_enables_editing() {
        let config = EditingConfiguration::default();
        assert!(config.is_editing_enabled);
        assert!(config.effective_rules().is_empty());
        assert_eq!(config.effective_auto_save_interval(), None);
    }

    #[test]
    fn test_length_bounds_come_first() {
        let config = EditingConfiguration::default()
            .with_rule(Rule::pattern("a", "needs a"))
            .with_max_length(10);
        let rules = config.effective_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].kind(), RuleKind::Length);
        assert_eq!(rules[1].kind(), RuleKind::Pattern);
    }

    #[test]
    fn test_zero_interval_disables_auto_save() {
        let config = EditingConfiguration::default().with_auto_save(Duration::ZERO);
        assert_eq!(config.effective_auto_save_interval(), None);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
max_length: 40
auto_save_interval_ms: 1500
character_count: both
dynamic_height: true
rules:
  - type: pattern
    expression: "^[a-z ]+$"
    message: "lowercase only"
  - type: length
    min: 2
"#;
        let config = EditingConfiguration::from_yaml_str(yaml).unwrap();
        assert!(config.is_editing_enabled);
        assert_eq!(config.max_length, Some(40));
        assert_eq!(
            config.auto_save_interval,
            Some(Duration::from_millis(1500))
        );
        assert_eq!(config.character_count_mode, CharacterCountMode::Both);
        assert!(config.dynamic_height_enabled);
        assert_eq!(config.validation_rules.len(), 2);
        assert_eq!(
            config.validation_rules[0].check("ABC").as_deref(),
            Some("lowercase only")
        );
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(EditingConfiguration::from_yaml_str("colour: red\n").is_err());
    }

    #[test]
    fn test_parse_empty_document_gives_defaults() {
        let config = EditingConfiguration::from_yaml_str("{}").unwrap();
        assert!(config.is_editing_enabled);
        assert!(config.validation_rules.is_empty());
    }
}
