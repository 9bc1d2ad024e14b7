//! List rules command implementation.

use drf_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::from("Available rules:\n\n");
    out.push_str(&format!("{:<10} {:<28} {:<9} Description\n", "Code", "Name", "Severity"));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for rule in all_rules() {
        out.push_str(&format!(
            "{:<10} {:<28} {:<9} {}\n",
            rule.code(),
            rule.name(),
            rule.default_severity(),
            rule.description()
        ));
    }

    out.push_str("\nUse --rules to run a subset, by name or code:\n");
    out.push_str("  drf-lint check --rules require-is-authenticated\n");
    out.push_str("  drf-lint check --rules PDR001\n");
    out
}
