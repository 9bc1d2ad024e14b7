//! # drf-lint
//!
//! Linter for Django REST framework views.
//!
//! This is the main facade crate that re-exports core functionality and rules,
//! and provides the [`Plugin`] adapter for embedding the check in a host
//! linter.
//!
//! ## Host Integration
//!
//! ```rust,ignore
//! use drf_lint::{python::PythonParser, Plugin};
//!
//! let tree = PythonParser::new().parse(&source)?;
//! for (line, column, message, _reporter) in Plugin::new(&tree, "views.py").run() {
//!     println!("views.py:{line}:{}: {message}", column + 1);
//! }
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use drf_lint::Analyzer;
//! use drf_lint::rules::all_rules;
//!
//! let mut builder = Analyzer::builder().root("./api");
//! for rule in all_rules() {
//!     builder = builder.rule_box(rule);
//! }
//! let result = builder.build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use drf_lint_core::*;

/// Built-in rules.
pub mod rules {
    pub use drf_lint_rules::*;
}

mod plugin;

pub use plugin::{Plugin, PluginInfo, Report, Reports};
