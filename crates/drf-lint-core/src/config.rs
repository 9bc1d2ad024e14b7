//! `drf-lint.toml` settings.
//!
//! ```toml
//! fail_on = "warning"
//!
//! [analyzer]
//! exclude = ["**/generated/**"]
//!
//! [rules.require-is-authenticated]
//! severity = "warning"
//! allow_in_tests = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::Severity;

/// Parsed configuration file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lowest severity that fails a run.
    #[serde(default)]
    pub fail_on: Severity,

    /// `[analyzer]` section.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// `[rules.<name>]` sections, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file is unreadable, [`ConfigError::Parse`]
    /// if it is not a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML, unknown severities or
    /// mistyped fields.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Rules are on unless their section says `enabled = false`.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rule(rule_name)
            .and_then(|rule| rule.enabled)
            .unwrap_or(true)
    }

    /// The `severity` override for a rule, if set.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rule(rule_name).and_then(|rule| rule.severity)
    }

    /// The `[rules.<name>]` section, if present.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// `[analyzer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory checked when none is given explicitly.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns of paths to skip. Setting this replaces the defaults.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Skip files ignored by `.gitignore`.
    #[serde(default = "default_respect_gitignore")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_excludes(),
            respect_gitignore: default_respect_gitignore(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_excludes() -> Vec<String> {
    [
        "**/.venv/**",
        "**/venv/**",
        "**/node_modules/**",
        "**/migrations/**",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_respect_gitignore() -> bool {
    true
}

/// `[rules.<name>]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// `false` turns the rule off.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Replaces the rule's severity.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Any other keys, interpreted by the rule itself.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Reads a boolean option, falling back to `default` when the key is
    /// absent or not a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }
}

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Read error.
        source: std::io::Error,
    },

    /// The file is not a valid configuration.
    #[error("invalid config: {message}")]
    Parse {
        /// Description from the TOML deserializer.
        message: String,
    },
}
