//! Violations, their positions, and the result of a run.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How serious a violation is. Ordered `Info < Warning < Error`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, never fails a run on its own.
    Info,
    /// Worth fixing.
    Warning,
    /// Must be fixed.
    #[default]
    Error,
}

impl Severity {
    /// Lowercase name, as used in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Info, Self::Warning, Self::Error]
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown severity '{s}'"))
    }
}

/// Where a violation was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File, relative to the checked directory.
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// Byte offset of the highlighted span.
    pub offset: usize,
    /// Byte length of the highlighted span; 0 when unknown.
    pub length: usize,
}

impl Location {
    /// A point location without a span.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Attaches the byte span to highlight in snippets.
    #[must_use]
    pub fn with_span(self, offset: usize, length: usize) -> Self {
        Self {
            offset,
            length,
            ..self
        }
    }
}

/// A hint on how to fix a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The hint text.
    pub message: String,
}

impl Suggestion {
    /// Wraps a hint.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One finding of one rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code, e.g. `PDR001`.
    pub code: String,
    /// Rule name, e.g. `require-is-authenticated`.
    pub rule: String,
    /// Effective severity, after config overrides.
    pub severity: Severity,
    /// Position in the source.
    pub location: Location,
    /// Problem description, without the code.
    pub message: String,
    /// Fix hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a violation without a suggestion.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attaches a fix hint.
    #[must_use]
    pub fn with_suggestion(self, suggestion: Suggestion) -> Self {
        Self {
            suggestion: Some(suggestion),
            ..self
        }
    }

    /// Multi-line human-readable block: header, severity line, optional help.
    #[must_use]
    pub fn format(&self) -> String {
        let Location {
            file, line, column, ..
        } = &self.location;
        let mut block = format!(
            "{} {} at {}:{line}:{column}\n  {}: {}\n",
            self.code,
            self.rule,
            file.display(),
            self.severity,
            self.message
        );
        if let Some(suggestion) = &self.suggestion {
            block.push_str("  = help: ");
            block.push_str(&suggestion.message);
            block.push('\n');
        }
        block
    }
}

/// `file:line:col: severity [code] message`
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Location {
            file, line, column, ..
        } = &self.location;
        write!(
            f,
            "{}:{line}:{column}: {} [{}] {}",
            file.display(),
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation as a miette diagnostic, for rendering with a source snippet.
///
/// Attach the file contents with `miette::Report::with_source_code`.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{code}] {message}")]
pub struct ViolationDiagnostic {
    code: String,
    message: String,
    #[help]
    help: Option<String>,
    #[label("{rule}")]
    span: SourceSpan,
    rule: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(violation: &Violation) -> Self {
        Self {
            code: violation.code.clone(),
            message: violation.message.clone(),
            help: violation.suggestion.as_ref().map(|s| s.message.clone()),
            span: (violation.location.offset, violation.location.length).into(),
            rule: violation.rule.clone(),
        }
    }
}

/// Outcome of [`Analyzer::analyze`](crate::Analyzer::analyze).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Violations, ordered by file, line and column.
    pub violations: Vec<Violation>,
    /// Files parsed and checked; unparsable files are not counted.
    pub files_checked: usize,
}

impl LintResult {
    /// An empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if any violation is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// `true` if any violation is at least as severe as `threshold`.
    #[must_use]
    pub fn has_violations_at(&self, threshold: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= threshold)
    }

    /// Violation counts as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(errors, warnings, infos), v| match v.severity {
                Severity::Error => (errors + 1, warnings, infos),
                Severity::Warning => (errors, warnings + 1, infos),
                Severity::Info => (errors, warnings, infos + 1),
            })
    }
}
