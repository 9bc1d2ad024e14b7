//! Rule lookup and construction from configuration.

use drf_lint_core::{Config, RuleBox};

use crate::require_is_authenticated::{self, RequireIsAuthenticated};

/// Returns every built-in rule with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(RequireIsAuthenticated::new())]
}

/// Builds every built-in rule, applying options from `config`.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    vec![Box::new(RequireIsAuthenticated::from_config(
        config.rule(require_is_authenticated::NAME),
    ))]
}

/// Looks up a rule by name (`require-is-authenticated`) or code (`PDR001`).
#[must_use]
pub fn rule_by_name(name: &str, config: &Config) -> Option<RuleBox> {
    rules_from_config(config)
        .into_iter()
        .find(|rule| rule.name() == name || rule.code().eq_ignore_ascii_case(name))
}
