//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# drf-lint configuration

# Lowest severity that makes `drf-lint check` exit with status 1
fail_on = "error"

[analyzer]
# Directory to analyze when no path is given on the command line
# root = "."

# Glob patterns to exclude from analysis
exclude = [
    "**/.venv/**",
    "**/venv/**",
    "**/node_modules/**",
    "**/migrations/**",
]

# Respect .gitignore files
respect_gitignore = true

[rules.require-is-authenticated]
enabled = true
# severity = "warning"
# Skip test modules (tests/, test_*.py, conftest.py)
allow_in_tests = false
"#;

const CONFIG_FILE: &str = "drf-lint.toml";

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: drf-lint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}
