//! # drf-lint-core
//!
//! Core framework for linting Django REST framework code.
//!
//! This crate provides the foundational traits and types that rules build on:
//!
//! - [`Rule`] trait for per-file rules over the Python syntax model
//! - [`Analyzer`] for discovering files and running rules
//! - [`Violation`] for representing lint findings
//! - [`Config`] for `drf-lint.toml` settings
//!
//! ## Example
//!
//! ```ignore
//! use drf_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./api")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use types::{
    LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::noqa::{check_noqa, NoqaCheck};

/// Re-export of the syntax model rules operate on.
pub use drf_lint_python as python;
