//! Host linter adapter.
//!
//! Host linters in the flake8 mould hand a plugin the parsed tree and a
//! filename, then pull `(line, column, message, reporter)` tuples from it.
//! [`Plugin`] exposes the permission check in that shape.

use drf_lint_python::Module;
use drf_lint_rules::{check_module, Diagnostic};

/// Identifies the reporting plugin to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginInfo {
    /// Plugin name used for discovery.
    pub name: &'static str,
    /// Plugin version.
    pub version: &'static str,
}

/// One reported problem: `(line, column, message, reporter)`.
///
/// `line` is 1-indexed and `column` is a 0-indexed byte offset, matching
/// Python's own AST positions.
pub type Report = (usize, usize, &'static str, PluginInfo);

/// Adapter between a host linter and the permission check.
#[derive(Debug, Clone, Copy)]
pub struct Plugin<'a> {
    tree: &'a Module,
    filename: &'a str,
}

impl<'a> Plugin<'a> {
    /// Plugin name used for discovery.
    pub const NAME: &'static str = env!("CARGO_PKG_NAME");

    /// Plugin version.
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /// Creates the adapter for one file.
    #[must_use]
    pub fn new(tree: &'a Module, filename: &'a str) -> Self {
        Self { tree, filename }
    }

    /// Returns the reporter identity attached to every [`Report`].
    #[must_use]
    pub fn info() -> PluginInfo {
        PluginInfo {
            name: Self::NAME,
            version: Self::VERSION,
        }
    }

    /// Name of the file being checked.
    #[must_use]
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Returns the reports for this file.
    ///
    /// The tree is not walked until the first item is requested.
    #[must_use]
    pub fn run(&self) -> Reports<'a> {
        Reports {
            pending: Some(self.tree),
            diagnostics: Vec::new().into_iter(),
        }
    }
}

/// Lazy iterator returned by [`Plugin::run`].
#[derive(Debug)]
pub struct Reports<'a> {
    pending: Option<&'a Module>,
    diagnostics: std::vec::IntoIter<Diagnostic>,
}

impl Iterator for Reports<'_> {
    type Item = Report;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tree) = self.pending.take() {
            self.diagnostics = check_module(tree).into_iter();
        }
        self.diagnostics
            .next()
            .map(|d| (d.line, d.column, d.message, Plugin::info()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drf_lint_python::PythonParser;

    #[test]
    fn metadata_comes_from_package() {
        assert_eq!(Plugin::NAME, "drf-lint");
        assert!(!Plugin::VERSION.is_empty());
        assert_eq!(Plugin::info().name, Plugin::NAME);
    }

    #[test]
    fn run_yields_tuples() {
        let tree = PythonParser::new()
            .parse("class V(APIView):\n    permission_classes = [AllowAny]\n")
            .expect("valid python");
        let plugin = Plugin::new(&tree, "views.py");
        assert_eq!(plugin.filename(), "views.py");

        let reports: Vec<Report> = plugin.run().collect();
        assert_eq!(
            reports,
            vec![(
                2,
                4,
                "PDR001 IsAuthenticated permission is missing in permission_classes",
                Plugin::info()
            )]
        );
    }

    #[test]
    fn each_run_starts_fresh() {
        let tree = PythonParser::new()
            .parse("class V:\n    permission_classes = ()\n")
            .expect("valid python");
        let plugin = Plugin::new(&tree, "views.py");
        let first: Vec<Report> = plugin.run().collect();
        let second: Vec<Report> = plugin.run().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
