//! Check command implementation.

use anyhow::{Context, Result};
use drf_lint_core::{Analyzer, Config, RuleBox};
use drf_lint_rules::{rule_by_name, rules_from_config};
use std::path::Path;

use crate::config_resolver::{self, ConfigSource};
use crate::OutputFormat;

/// Runs the check command, exiting with status 1 when violations at or
/// above the `fail_on` threshold remain.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = load_config(source)?;
    let threshold = config.fail_on;

    let rules = match rules_filter {
        Some(filter) => select_rules(filter, &config),
        None => rules_from_config(&config),
    };

    let mut builder = Analyzer::builder().root(path).config(config);
    for pattern in exclude {
        builder = builder.exclude(pattern);
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rule(s)",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, config_resolver::project_dir(path))?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Resolves a comma-separated list of rule names or codes.
fn select_rules(filter: &str, config: &Config) -> Vec<RuleBox> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let rule = rule_by_name(name, config);
            if rule.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            rule
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn select_rules_by_name_and_code() {
        let config = Config::default();
        assert_eq!(select_rules("require-is-authenticated", &config).len(), 1);
        assert_eq!(select_rules(" PDR001 ,", &config).len(), 1);
        assert!(select_rules("no-such-rule", &config).is_empty());
    }

    #[test]
    fn default_source_loads_defaults() {
        let config = load_config(&ConfigSource::Default).unwrap();
        assert!(config.rules.is_empty());
        assert!(config.analyzer.respect_gitignore);
    }

    #[test]
    fn project_source_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drf-lint.toml");
        fs::write(
            &path,
            "fail_on = \"warning\"\n\n[rules.require-is-authenticated]\nenabled = false\n",
        )
        .unwrap();

        let config = load_config(&ConfigSource::Project(path)).unwrap();
        assert!(!config.is_rule_enabled("require-is-authenticated"));
        assert_eq!(config.fail_on, drf_lint_core::Severity::Warning);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config(&ConfigSource::Explicit("/nonexistent/drf-lint.toml".into()))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
