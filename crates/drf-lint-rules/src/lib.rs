//! # drf-lint-rules
//!
//! Built-in lint rules for drf-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PDR001 | `require-is-authenticated` | Requires `IsAuthenticated` in literal `permission_classes` lists |
//!
//! ## Usage
//!
//! ```ignore
//! use drf_lint_core::Analyzer;
//! use drf_lint_rules::RequireIsAuthenticated;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./api")
//!     .rule(RequireIsAuthenticated::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod registry;
pub mod require_is_authenticated;

pub use registry::{all_rules, rule_by_name, rules_from_config};
pub use require_is_authenticated::{
    check_module, Diagnostic, PermissionClassesVisitor, RequireIsAuthenticated,
};

/// Re-export core types for convenience.
pub use drf_lint_core::{Rule, Severity, Violation};
