//! # drf-lint-python
//!
//! Python syntax model for drf-lint, built on Tree-sitter.
//!
//! Tree-sitter produces a concrete syntax tree keyed by string node kinds.
//! This crate lowers it into a small typed model so rules can pattern-match
//! on statement and expression variants instead of comparing kind strings:
//!
//! - [`Module`], [`Stmt`], [`Expr`] for the syntax model
//! - [`PythonParser`] for parsing source text into a [`Module`]
//! - [`visit::Visit`] for depth-first traversal
//!
//! ## Example
//!
//! ```ignore
//! use drf_lint_python::{PythonParser, Stmt};
//!
//! let module = PythonParser::new().parse("class V(APIView):\n    pass\n")?;
//! assert!(matches!(module.body[0], Stmt::ClassDef(_)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ast;
mod parser;
pub mod visit;

pub use ast::{
    AnnAssign, Assign, ClassDef, Compound, CompoundKind, Expr, FunctionDef, Module, Position, Stmt,
};
pub use parser::{ParseError, PythonParser};
