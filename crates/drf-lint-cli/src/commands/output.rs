//! Rendering of lint results for each `--format`.

use anyhow::Result;
use drf_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::{GraphicalReportHandler, NamedSource};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use crate::OutputFormat;

/// Prints `result` to stdout.
///
/// `base` is the directory violation paths are relative to; `pretty` reads
/// sources from it.
pub fn print(result: &LintResult, format: OutputFormat, base: &Path) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => render_json(result)?,
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Flake8 => render_flake8(result),
        OutputFormat::Pretty => render_pretty(result, base, &GraphicalReportHandler::new()),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    for violation in &result.violations {
        let severity = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };
        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(out, "  {severity}: {}", violation.message);
        if let Some(suggestion) = &violation.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        out.push('\n');
    }

    out.push_str(&summary_line(result));
    out
}

fn summary_line(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    format!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m\n",
        result.files_checked
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a LintResult,
    summary: Summary,
}

#[derive(Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
    infos: usize,
}

fn render_json(result: &LintResult) -> Result<String> {
    let (errors, warnings, infos) = result.count_by_severity();
    let report = JsonReport {
        result,
        summary: Summary {
            errors,
            warnings,
            infos,
        },
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| format!("{v}\n"))
        .collect()
}

fn render_flake8(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| {
            format!(
                "{}:{}:{}: {} {}\n",
                v.location.file.display(),
                v.location.line,
                v.location.column,
                v.code,
                v.message
            )
        })
        .collect()
}

fn render_pretty(result: &LintResult, base: &Path, handler: &GraphicalReportHandler) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        if render_snippet(&mut out, violation, base, handler).is_err() {
            out.push_str(&violation.format());
        }
    }
    out.push_str(&summary_line(result));
    out
}

fn render_snippet(
    out: &mut String,
    violation: &Violation,
    base: &Path,
    handler: &GraphicalReportHandler,
) -> Result<()> {
    let path = base.join(&violation.location.file);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        tracing::warn!("Cannot read {} for snippet: {}", path.display(), e);
        e
    })?;
    let report = miette::Report::new(ViolationDiagnostic::from(violation)).with_source_code(
        NamedSource::new(violation.location.file.display().to_string(), content),
    );
    handler.render_report(out, &*report)?;
    Ok(())
}
