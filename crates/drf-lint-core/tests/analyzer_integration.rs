//! Integration tests for the analyzer over a real directory tree.

use drf_lint_core::python::{visit::Visit, ClassDef, Module};
use drf_lint_core::{
    Analyzer, AnalyzerError, Config, FileContext, Location, Rule, Severity, Violation,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Flags every class definition.
struct EveryClass;

struct ClassVisitor<'a> {
    ctx: &'a FileContext<'a>,
    violations: Vec<Violation>,
}

impl Visit for ClassVisitor<'_> {
    fn visit_class_def(&mut self, node: &ClassDef) {
        self.violations.push(Violation::new(
            "TEST001",
            "every-class",
            Severity::Warning,
            Location::new(
                self.ctx.relative_path.clone(),
                node.position.line,
                node.position.column + 1,
            ),
            format!("class {}", node.name),
        ));
        drf_lint_core::python::visit::walk_class_def(self, node);
    }
}

impl Rule for EveryClass {
    fn name(&self) -> &'static str {
        "every-class"
    }

    fn code(&self) -> &'static str {
        "TEST001"
    }

    fn check(&self, ctx: &FileContext, module: &Module) -> Vec<Violation> {
        let mut visitor = ClassVisitor {
            ctx,
            violations: Vec::new(),
        };
        visitor.visit_module(module);
        visitor.violations
    }
}

fn project() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let api = tmp.path().join("api");
    fs::create_dir_all(api.join("migrations")).expect("mkdir");
    fs::write(api.join("views.py"), "class B:\n    pass\n\nclass A:\n    pass\n")
        .expect("write");
    fs::write(api.join("models.py"), "class M:\n    pass\n").expect("write");
    fs::write(api.join("migrations/0001_initial.py"), "class Migration:\n    pass\n")
        .expect("write");
    fs::write(api.join("README.md"), "class NotPython:\n").expect("write");
    tmp
}

#[test]
fn analyzes_python_files_and_sorts_violations() {
    let tmp = project();
    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .rule(EveryClass)
        .build()
        .expect("build");

    let result = analyzer.analyze().expect("analyze");

    assert_eq!(result.files_checked, 2);
    let found: Vec<(String, usize)> = result
        .violations
        .iter()
        .map(|v| (v.location.file.display().to_string(), v.location.line))
        .collect();
    assert_eq!(
        found,
        vec![
            ("api/models.py".to_string(), 1),
            ("api/views.py".to_string(), 1),
            ("api/views.py".to_string(), 4),
        ]
    );
}

#[test]
fn severity_override_and_disable_from_config() {
    let tmp = project();

    let config = Config::parse("[rules.every-class]\nseverity = \"error\"\n").expect("config");
    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .config(config)
        .rule(EveryClass)
        .build()
        .expect("build");
    let result = analyzer.analyze().expect("analyze");
    assert!(result.has_errors());

    let config = Config::parse("[rules.every-class]\nenabled = false\n").expect("config");
    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .config(config)
        .rule(EveryClass)
        .build()
        .expect("build");
    let result = analyzer.analyze().expect("analyze");
    assert!(result.violations.is_empty());
    assert_eq!(result.files_checked, 2);
}

#[test]
fn single_file_root() {
    let tmp = project();
    let file = tmp.path().join("api/views.py");
    let analyzer = Analyzer::builder()
        .root(&file)
        .rule(EveryClass)
        .build()
        .expect("build");

    let result = analyzer.analyze().expect("analyze");
    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 2);
    assert_eq!(result.violations[0].location.file, PathBuf::from("views.py"));
}

#[test]
fn parse_errors_are_skipped_unless_fatal() {
    let tmp = project();
    fs::write(tmp.path().join("api/broken.py"), "class (:\n").expect("write");
    // Latin-1 encoded, not valid UTF-8.
    fs::write(
        tmp.path().join("api/legacy.py"),
        b"# -*- coding: latin-1 -*-\nclass Caf\xe9:\n    pass\n",
    )
    .expect("write");

    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .rule(EveryClass)
        .build()
        .expect("build");
    let result = analyzer.analyze().expect("analyze");
    assert_eq!(result.files_checked, 2);
    assert!(result
        .violations
        .iter()
        .all(|v| v.location.file != PathBuf::from("api/legacy.py")));

    let analyzer = Analyzer::builder()
        .root(tmp.path().join("api/legacy.py"))
        .rule(EveryClass)
        .fail_on_parse_error(true)
        .build()
        .expect("build");
    assert!(matches!(
        analyzer.analyze(),
        Err(AnalyzerError::Decode { .. })
    ));

    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .rule(EveryClass)
        .fail_on_parse_error(true)
        .build()
        .expect("build");
    assert!(matches!(
        analyzer.analyze(),
        Err(AnalyzerError::Parse { .. })
    ));
}

#[test]
fn gitignore_is_respected() {
    let tmp = project();
    fs::write(tmp.path().join(".gitignore"), "api/models.py\n").expect("write");

    let analyzer = Analyzer::builder()
        .root(tmp.path())
        .rule(EveryClass)
        .build()
        .expect("build");
    let result = analyzer.analyze().expect("analyze");
    assert_eq!(result.files_checked, 1);
}
