//! Configuration types for fluent-lint.
//!
//! A configuration file maps rule codes to their settings:
//!
//! ```yaml
//! ID01:
//!   enabled: true
//!   exclusions:
//!     files: []
//!     messages:
//!       - brandShortName
//! ID02:
//!   enabled: true
//!   min_length: 7
//! SY05:
//!   disabled: true
//! ```
//!
//! The raw [`Config`] is resolved once into a [`RuleSet`], which is what the
//! linter consults while walking a file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::rule_id::{RuleCategory, RuleId};

/// Top-level configuration, as written in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    /// Per-rule settings keyed by rule code (e.g., "ID01").
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates an empty configuration, in which every rule is disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    ///
    /// Files ending in `.toml` are read as TOML, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::parse_toml(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// Parses configuration from YAML.
    ///
    /// Only the first document of a multi-document stream is used. An empty
    /// document yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let Some(document) = serde_yaml::Deserializer::from_str(content).next() else {
            return Ok(Self::default());
        };
        let config = Option::<Self>::deserialize(document).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Ok(config.unwrap_or_default())
    }

    /// Parses configuration from TOML, using one table per rule code.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Resolves the configuration into a typed [`RuleSet`].
    ///
    /// Unknown rule codes are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when ID02 is enabled without a
    /// `min_length`.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        let mut set = RuleSet::new();

        for (key, rule_config) in &self.rules {
            let Ok(rule) = key.parse::<RuleId>() else {
                warn!(rule = %key, "ignoring configuration for unknown rule");
                continue;
            };

            set.exclusions.insert(rule, rule_config.exclusions.clone());

            if !rule_config.activates(rule) {
                debug!(%rule, "rule disabled by configuration");
                continue;
            }

            if rule == RuleId::Id02 {
                let min_length = rule_config.min_length.ok_or_else(|| ConfigError::Invalid {
                    message: "ID02 is enabled but has no min_length".to_string(),
                })?;
                set.id_min_length = min_length;
            }

            set.enabled.insert(rule);
        }

        Ok(set)
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Turns the rule on.
    pub enabled: Option<bool>,

    /// For SY rules: the syntax is disabled in this project, so its use is
    /// reported.
    pub disabled: Option<bool>,

    /// Minimum identifier length (ID02).
    pub min_length: Option<usize>,

    /// Files and identifiers the rule does not apply to.
    #[serde(deserialize_with = "nullable")]
    pub exclusions: Exclusions,
}

impl RuleConfig {
    /// Whether these settings turn `rule` on.
    ///
    /// Syntax rules read naturally as "this syntax is disabled", so for them
    /// `disabled: true` enables the check. `enabled: true` works for every
    /// rule.
    fn activates(&self, rule: RuleId) -> bool {
        match rule.category() {
            RuleCategory::Syntax => self.disabled.or(self.enabled).unwrap_or(false),
            _ => self.enabled.unwrap_or(false),
        }
    }
}

/// Exclusion lists for one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exclusions {
    /// File paths, matched against the end of the checked file's path.
    #[serde(deserialize_with = "nullable")]
    pub files: Vec<String>,
    /// Message or term identifiers.
    #[serde(deserialize_with = "nullable")]
    pub messages: Vec<String>,
}

impl Exclusions {
    /// Whether `path` or `identifier` is listed.
    #[must_use]
    pub fn matches(&self, path: &Path, identifier: &str) -> bool {
        self.files
            .iter()
            .any(|file| !file.is_empty() && path.ends_with(Path::new(file)))
            || self.messages.iter().any(|message| message == identifier)
    }
}

/// Treats an explicit `null` (e.g. `files:` with nothing after it) as the
/// default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The resolved, immutable rule configuration shared by all files of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    enabled: BTreeSet<RuleId>,
    exclusions: BTreeMap<RuleId, Exclusions>,
    id_min_length: usize,
}

impl RuleSet {
    /// Creates a rule set with every rule disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule set with every rule enabled.
    ///
    /// ID02 only reports once a minimum is set with
    /// [`with_min_length`](Self::with_min_length).
    #[must_use]
    pub fn all_enabled() -> Self {
        Self {
            enabled: RuleId::ALL.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Enables a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: RuleId) -> Self {
        self.enabled.insert(rule);
        self
    }

    /// Sets the exclusions of a rule.
    #[must_use]
    pub fn with_exclusions(mut self, rule: RuleId, exclusions: Exclusions) -> Self {
        self.exclusions.insert(rule, exclusions);
        self
    }

    /// Sets the minimum identifier length used by ID02.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.id_min_length = min_length;
        self
    }

    /// Keeps only the listed rules enabled.
    #[must_use]
    pub fn restrict_to(mut self, rules: &[RuleId]) -> Self {
        self.enabled.retain(|rule| rules.contains(rule));
        self
    }

    /// Whether a rule is enabled.
    #[must_use]
    pub fn is_enabled(&self, rule: RuleId) -> bool {
        self.enabled.contains(&rule)
    }

    /// Enabled rules, in code order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.enabled.iter().copied()
    }

    /// Whether `rule` is switched off for this file or identifier.
    #[must_use]
    pub fn is_excluded(&self, rule: RuleId, path: &Path, identifier: &str) -> bool {
        self.exclusions
            .get(&rule)
            .is_some_and(|exclusions| exclusions.matches(path, identifier))
    }

    /// Minimum identifier length for ID02.
    #[must_use]
    pub fn id_min_length(&self) -> usize {
        self.id_min_length
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Well-formed configuration with settings that do not fit together.
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}
