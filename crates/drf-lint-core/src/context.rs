//! Per-file information handed to rules.

use std::path::{Component, Path, PathBuf};

/// Directory names whose contents are test code.
const TEST_DIRS: &[&str] = &["tests", "test"];

/// File names that are test code wherever they live.
const TEST_FILES: &[&str] = &["tests.py", "conftest.py"];

/// The file a rule is looking at.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path as discovered on disk.
    pub path: &'a Path,
    /// Source text.
    pub content: &'a str,
    /// Whether the file follows pytest or Django test naming.
    pub is_test: bool,
    /// Path relative to the checked directory, used in reports.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Describes `path`, reporting it relative to `root` when it lies below it.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        Self {
            path,
            content,
            is_test: is_test_path(path),
            relative_path,
        }
    }

    /// Byte offset of a 1-based `line` and 0-based byte `column`.
    ///
    /// Columns past the end of the line clamp to its end; lines past the end
    /// of the file map to the file length.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        let Some(skip) = line.checked_sub(1) else {
            return 0;
        };
        let mut lines = self.content.split_inclusive('\n');
        let before: usize = lines.by_ref().take(skip).map(str::len).sum();
        match lines.next() {
            Some(text) => before + column.min(text.len()),
            None => before,
        }
    }
}

fn is_test_path(path: &Path) -> bool {
    let in_test_dir = path.components().any(|component| {
        matches!(component, Component::Normal(name) if TEST_DIRS.iter().any(|dir| name == *dir))
    });
    if in_test_dir {
        return true;
    }

    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            TEST_FILES.contains(&name)
                || name.starts_with("test_")
                || name.ends_with("_test.py")
                || name.ends_with("_tests.py")
        })
}
