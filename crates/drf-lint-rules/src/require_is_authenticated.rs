//! Rule requiring `IsAuthenticated` in every literal `permission_classes`.
//!
//! # Rationale
//!
//! A Django REST framework view that sets `permission_classes` replaces the
//! project-wide default. Forgetting `IsAuthenticated` there silently opens
//! the endpoint to anonymous users.
//!
//! # Matching
//!
//! Only `permission_classes = [...]` or `permission_classes = (...)` written
//! directly in a class body is checked, and only bare names inside the
//! literal count. `permissions.IsAuthenticated`, `IsAuthenticated & IsAdmin`,
//! or a name bound to a list elsewhere are not resolved: the first two do not
//! count as present, the last is not checked at all.
//!
//! # Configuration
//!
//! - `allow_in_tests`: Skip test files (default: false)
//!
//! # Suppression
//!
//! - `# noqa: PDR001` on the assignment line, or on a line it continues
//!   onto with a trailing `\`

use drf_lint_core::utils::check_noqa;
use drf_lint_core::{FileContext, Location, Rule, RuleConfig, Severity, Suggestion, Violation};
use drf_lint_python::visit::{self, Visit};
use drf_lint_python::{Assign, ClassDef, Expr, Module, Stmt};

/// Rule code for require-is-authenticated.
pub const CODE: &str = "PDR001";

/// Rule name for require-is-authenticated.
pub const NAME: &str = "require-is-authenticated";

/// Class attribute the rule inspects.
pub const PERMISSION_ATTRIBUTE: &str = "permission_classes";

/// Permission class that must be listed.
pub const REQUIRED_PERMISSION: &str = "IsAuthenticated";

/// Message reported to host linters, code included.
pub const MESSAGE: &str = "PDR001 IsAuthenticated permission is missing in permission_classes";

/// [`MESSAGE`] without the leading code, for [`Violation::message`].
const SUMMARY: &str = "IsAuthenticated permission is missing in permission_classes";

/// A `permission_classes` assignment lacking `IsAuthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Line of the assignment (1-indexed).
    pub line: usize,
    /// Column of the assignment (0-indexed byte offset).
    pub column: usize,
    /// Always [`MESSAGE`].
    pub message: &'static str,
}

/// Collects a [`Diagnostic`] for every offending assignment in a module.
///
/// A class body is scanned before its nested classes are visited, so a
/// nested `Meta`-style class reports after its enclosing class.
#[derive(Debug, Default)]
pub struct PermissionClassesVisitor {
    diagnostics: Vec<Diagnostic>,
}

impl PermissionClassesVisitor {
    /// Creates an empty visitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the diagnostics in visitation order.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Visit for PermissionClassesVisitor {
    fn visit_class_def(&mut self, node: &ClassDef) {
        for stmt in &node.body {
            if let Stmt::Assign(assign) = stmt {
                if lacks_required_permission(assign) {
                    self.diagnostics.push(Diagnostic {
                        line: assign.position.line,
                        column: assign.position.column,
                        message: MESSAGE,
                    });
                }
            }
        }

        visit::walk_class_def(self, node);
    }
}

fn lacks_required_permission(assign: &Assign) -> bool {
    let [target] = assign.targets.as_slice() else {
        return false;
    };
    if target.as_name() != Some(PERMISSION_ATTRIBUTE) {
        return false;
    }
    let Some(elts) = assign.value.sequence_elts() else {
        return false;
    };

    !elts
        .iter()
        .filter_map(Expr::as_name)
        .any(|name| name == REQUIRED_PERMISSION)
}

/// Runs a fresh [`PermissionClassesVisitor`] over `module`.
#[must_use]
pub fn check_module(module: &Module) -> Vec<Diagnostic> {
    let mut visitor = PermissionClassesVisitor::new();
    visitor.visit_module(module);
    visitor.into_diagnostics()
}

/// Requires `IsAuthenticated` in literal `permission_classes` lists.
#[derive(Debug, Clone)]
pub struct RequireIsAuthenticated {
    /// Skip test files.
    pub allow_in_tests: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RequireIsAuthenticated {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireIsAuthenticated {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_in_tests: false,
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its `[rules.require-is-authenticated]` section.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        let rule = Self::new();
        match config {
            Some(config) => rule.allow_in_tests(config.get_bool("allow_in_tests", false)),
            None => rule,
        }
    }

    /// Sets whether to skip test files.
    #[must_use]
    pub fn allow_in_tests(mut self, allow: bool) -> Self {
        self.allow_in_tests = allow;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for RequireIsAuthenticated {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires IsAuthenticated in permission_classes lists"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
        if self.allow_in_tests && ctx.is_test {
            return Vec::new();
        }

        check_module(module)
            .into_iter()
            .filter(|d| {
                let suppressed = check_noqa(ctx.content, d.line, CODE).is_suppressed();
                if suppressed {
                    tracing::debug!(
                        "{CODE} suppressed by noqa at {}:{}",
                        ctx.relative_path.display(),
                        d.line
                    );
                }
                !suppressed
            })
            .map(|d| {
                let location = Location::new(ctx.relative_path.clone(), d.line, d.column + 1)
                    .with_span(
                        ctx.offset_for(d.line, d.column),
                        PERMISSION_ATTRIBUTE.len(),
                    );
                Violation::new(CODE, NAME, self.severity, location, SUMMARY).with_suggestion(
                    Suggestion::new(format!(
                        "Add {REQUIRED_PERMISSION} to {PERMISSION_ATTRIBUTE}, or `# noqa: {CODE}` if the endpoint is public on purpose"
                    )),
                )
            })
            .collect()
    }
}
