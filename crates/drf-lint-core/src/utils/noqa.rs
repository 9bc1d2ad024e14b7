//! Inline `# noqa` suppression comments.
//!
//! Follows flake8's conventions so existing suppressions keep working:
//! ```text
//! permission_classes = [AllowAny]  # noqa
//! permission_classes = [AllowAny]  # noqa: PDR001
//! permission_classes = [AllowAny]  # NOQA:PDR001,E501
//! ```
//! Codes match by prefix, so `# noqa: PDR0` covers `PDR001` through `PDR099`.
//!
//! A line ending in `\` continues onto the next, and a directive anywhere on
//! the joined lines applies:
//! ```text
//! permission_classes = \
//!     [AllowAny]  # noqa
//! ```

/// Result of checking a line for a `# noqa` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoqaCheck {
    /// No applicable directive on the line.
    Active,
    /// Suppressed by a directive.
    Suppressed {
        /// Codes listed in the directive, or `None` for a bare `# noqa`.
        codes: Option<Vec<String>>,
    },
}

impl NoqaCheck {
    /// Returns true if the violation is suppressed.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed { .. })
    }
}

/// Parsed `# noqa` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    All,
    Codes(Vec<String>),
}

/// Checks whether `code` is suppressed on `line` (1-indexed) of `content`.
#[must_use]
pub fn check_noqa(content: &str, line: usize, code: &str) -> NoqaCheck {
    let Some(start) = line.checked_sub(1) else {
        return NoqaCheck::Active;
    };

    match continued_lines(content, start).find_map(parse_directive) {
        Some(Directive::All) => NoqaCheck::Suppressed { codes: None },
        Some(Directive::Codes(codes)) => {
            let code = code.to_ascii_uppercase();
            if codes.iter().any(|c| code.starts_with(c.as_str())) {
                NoqaCheck::Suppressed { codes: Some(codes) }
            } else {
                NoqaCheck::Active
            }
        }
        None => NoqaCheck::Active,
    }
}

/// The physical line at `start` plus any lines it continues onto with `\`.
fn continued_lines(content: &str, start: usize) -> impl Iterator<Item = &str> {
    let mut continues = true;
    content.lines().skip(start).take_while(move |line| {
        let take = continues;
        // A trailing backslash inside a comment does not continue the line.
        continues = line.trim_end().ends_with('\\') && !line.contains('#');
        take
    })
}

/// Finds the first `# noqa` directive on a physical line.
fn parse_directive(line: &str) -> Option<Directive> {
    let mut rest = line;
    while let Some(hash) = rest.find('#') {
        let comment = rest[hash + 1..].trim_start();
        if comment
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("noqa"))
        {
            return Some(parse_codes(&comment[4..]));
        }
        rest = &rest[hash + 1..];
    }
    None
}

/// Parses what follows `noqa`. Anything other than a valid code list is a bare `noqa`.
fn parse_codes(after: &str) -> Directive {
    let Some(list) = after.strip_prefix(':') else {
        return Directive::All;
    };

    let codes: Vec<String> = list
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .take_while(|token| is_code(token))
        .map(str::to_ascii_uppercase)
        .collect();

    if codes.is_empty() {
        Directive::All
    } else {
        Directive::Codes(codes)
    }
}

/// A code is letters followed by digits, e.g. `PDR001` or `E501`.
fn is_code(token: &str) -> bool {
    let digits_at = token
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(token.len());
    digits_at > 0
        && digits_at < token.len()
        && token[digits_at..].chars().all(|c| c.is_ascii_digit())
}
