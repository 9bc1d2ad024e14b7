//! File discovery and rule execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use drf_lint_python::{ParseError, PythonParser};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failures that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A source file or directory could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// A Python file is not valid syntax (only with `fail_on_parse_error`).
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error.
        source: ParseError,
    },

    /// A source file is not UTF-8 (only with `fail_on_parse_error`).
    #[error("cannot decode {path} as UTF-8: {source}")]
    Decode {
        /// File that failed to decode.
        path: PathBuf,
        /// Decoding error.
        source: std::string::FromUtf8Error,
    },

    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Collects rules and settings for an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    excludes: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Starts with no rules, no extra excludes and default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory (or single `.py` file) to check. Falls back to
    /// `analyzer.root` from the config, then to the working directory.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Registers a rule.
    #[must_use]
    pub fn rule<R: Rule + 'static>(self, rule: R) -> Self {
        self.rule_box(Box::new(rule))
    }

    /// Registers an already boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Skips paths matching `pattern`, in addition to the configured excludes.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Uses `config` for excludes, rule toggles and severity overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Turns unparsable or undecodable files into a hard error instead of a
    /// warning.
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Finalizes the analyzer.
    ///
    /// # Errors
    ///
    /// Fails if the working directory is unavailable for a relative root, or
    /// if an exclude pattern does not compile.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };

        let mut patterns = self.excludes;
        patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = Excludes::new(patterns)?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            excludes,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
            parser: PythonParser::new(),
        })
    }
}

/// Compiled exclude globs.
struct Excludes {
    raw: Vec<String>,
    globs: Vec<glob::Pattern>,
}

impl Excludes {
    fn new(raw: Vec<String>) -> Result<Self, glob::PatternError> {
        let globs = raw
            .iter()
            .map(String::as_str)
            .map(glob::Pattern::new)
            .collect::<Result<_, _>>()?;
        Ok(Self { raw, globs })
    }

    fn matches(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        if self.globs.iter().any(|glob| glob.matches(&path)) {
            return true;
        }
        // "**/migrations/**" also matches as the fragment "/migrations/".
        self.raw.iter().any(|pattern| {
            let fragment = pattern.replace("**", "");
            fragment.len() > 1 && path.contains(&fragment)
        })
    }
}

/// Runs a set of rules over every Python file under a root.
///
/// Build one with [`Analyzer::builder()`].
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    excludes: Excludes,
    config: Config,
    fail_on_parse_error: bool,
    parser: PythonParser,
}

impl Analyzer {
    /// Shorthand for [`AnalyzerBuilder::new`].
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Absolute path of the checked directory or file.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of registered rules, enabled or not.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Checks every discovered file.
    ///
    /// Violations come back ordered by file, line and column.
    ///
    /// # Errors
    ///
    /// Fails on I/O and traversal errors, and on the first unparsable or
    /// non-UTF-8 file when `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let files = self.source_files()?;
        info!("Found {} Python file(s)", files.len());

        let mut result = LintResult::new();
        for path in &files {
            match self.check_file(path) {
                Ok(violations) => {
                    result.files_checked += 1;
                    result.violations.extend(violations);
                }
                Err(AnalyzerError::Parse { path, source }) if !self.fail_on_parse_error => {
                    warn!("Skipping {}: {}", path.display(), source);
                }
                Err(AnalyzerError::Decode { path, source }) if !self.fail_on_parse_error => {
                    warn!("Skipping {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }

        result.violations.sort_by(|a, b| {
            (&a.location.file, a.location.line, a.location.column).cmp(&(
                &b.location.file,
                b.location.line,
                b.location.column,
            ))
        });

        info!(
            "Analysis complete: {} violation(s) in {} file(s)",
            result.violations.len(),
            result.files_checked
        );
        Ok(result)
    }

    /// Parses one file and runs every enabled rule on it.
    fn check_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Checking {}", path.display());

        let content =
            String::from_utf8(std::fs::read(path)?).map_err(|source| AnalyzerError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        let module = self
            .parser
            .parse(&content)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Paths are reported relative to the directory being checked.
        let base = match self.root.parent() {
            Some(parent) if self.root.is_file() => parent,
            _ => self.root.as_path(),
        };
        let ctx = FileContext::new(path, &content, base);

        let mut violations = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Rule {} disabled by config", rule.name());
                continue;
            }
            let override_severity = self.config.rule_severity(rule.name());
            violations.extend(rule.check(&ctx, &module).into_iter().map(|mut v| {
                if let Some(severity) = override_severity {
                    v.severity = severity;
                }
                v
            }));
        }
        Ok(violations)
    }

    /// Lists `.py` files under the root, sorted, minus excluded paths.
    fn source_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let walker = ignore::WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let path = entry?.into_path();
            let is_python = path.extension().is_some_and(|ext| ext == "py");
            if !is_python || !path.is_file() {
                continue;
            }
            if self.excludes.matches(&path) {
                debug!("Excluded {}", path.display());
                continue;
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }
}
