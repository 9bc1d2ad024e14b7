//! Utility functions for rule implementations.

pub mod noqa;

#[doc(inline)]
pub use noqa::{check_noqa, NoqaCheck};
