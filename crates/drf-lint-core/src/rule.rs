//! The per-file rule interface.

use drf_lint_python::Module;

use crate::context::FileContext;
use crate::types::{Severity, Violation};

/// A check run once per parsed Python file.
///
/// Rules usually walk the module with a [`drf_lint_python::visit::Visit`]
/// implementation and turn what they find into [`Violation`]s.
///
/// ```ignore
/// use drf_lint_core::{FileContext, Rule, Violation};
/// use drf_lint_python::{visit::Visit, Module};
///
/// struct NoAllowAny;
///
/// impl Rule for NoAllowAny {
///     fn name(&self) -> &'static str { "no-allow-any" }
///     fn code(&self) -> &'static str { "PDR900" }
///
///     fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
///         let mut finder = AllowAnyFinder::new(ctx);
///         finder.visit_module(module);
///         finder.found
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Kebab-case name, also the key of its `[rules.<name>]` config section.
    fn name(&self) -> &'static str;

    /// Short code such as `PDR001`, matched by `# noqa` comments.
    fn code(&self) -> &'static str;

    /// One-line summary for `list-rules`.
    fn description(&self) -> &'static str {
        ""
    }

    /// Severity used unless the config overrides it.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks one file. `module` is the parse of `ctx.content`.
    fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation>;
}

/// Owned, type-erased rule.
pub type RuleBox = Box<dyn Rule>;
