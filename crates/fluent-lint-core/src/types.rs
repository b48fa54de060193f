//! Core types for lint violations and results.

use std::fmt::Write as _;
use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::rule_id::RuleId;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the checked root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
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

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "RC01").
    pub code: String,
    /// Rule name (e.g., "resource-comment-placement").
    pub rule: String,
    /// Where the offending node starts.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation of `rule`.
    #[must_use]
    pub fn new(rule: RuleId, location: Location, message: impl Into<String>) -> Self {
        Self {
            code: rule.code().to_string(),
            rule: rule.name().to_string(),
            location,
            message: message.into(),
        }
    }

    /// Formats the violation as a report block.
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "File path: {}", self.location.file.display());
        let _ = writeln!(
            output,
            "Position: line {} column {}",
            self.location.line, self.location.column
        );
        let _ = writeln!(output, "Error ({}): {}", self.code, self.message);
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.code,
            self.message
        )
    }
}

/// A file that could not be parsed; no rule ran on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// Where parsing stopped.
    pub location: Location,
    /// Parser message.
    pub message: String,
}

impl FileError {
    /// Creates a new file error.
    #[must_use]
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    /// Formats the error as a report block.
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "File path: {}", self.location.file.display());
        let _ = writeln!(
            output,
            "Position: line {} column {}",
            self.location.line, self.location.column
        );
        let _ = writeln!(output, "Syntax error: {}", self.message);
        output
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: syntax error: {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.message
        )
    }
}

/// Renders a [`FileError`] with a source snippet through miette.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(fluent_lint::syntax_error))]
pub struct SyntaxDiagnostic {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("syntax error")]
    span: SourceSpan,
}

impl SyntaxDiagnostic {
    /// Pairs an error with the text of the file it was found in.
    #[must_use]
    pub fn new(error: &FileError, source: String) -> Self {
        let name = error.location.file.display().to_string();
        Self {
            message: error.message.clone(),
            source_code: NamedSource::new(name, source),
            span: SourceSpan::from((error.location.offset, error.location.length)),
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Files that failed to parse.
    pub file_errors: Vec<FileError>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any rule reported a violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns true if there are violations or unparsable files.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.has_violations() || !self.file_errors.is_empty()
    }

    /// Adds violations and errors from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.file_errors.extend(other.file_errors);
        self.files_checked += other.files_checked;
    }

    /// Orders violations and errors by file, then line, then column.
    ///
    /// The sort is stable, so violations at the same position keep the order
    /// in which the rules reported them.
    pub fn sort(&mut self) {
        self.violations
            .sort_by(|a, b| position_key(&a.location).cmp(&position_key(&b.location)));
        self.file_errors
            .sort_by(|a, b| position_key(&a.location).cmp(&position_key(&b.location)));
    }

    /// Formats every problem as a plain-text report.
    ///
    /// Empty when there is nothing to report.
    #[must_use]
    pub fn format_report(&self) -> String {
        if !self.has_problems() {
            return String::new();
        }

        let mut report = String::new();
        for error in &self.file_errors {
            let _ = writeln!(report, "{}", error.format());
        }
        for violation in &self.violations {
            let _ = writeln!(report, "{}", violation.format());
        }
        let _ = writeln!(report, "{}", self.summary());
        report
    }

    /// One-line count of violations, syntax errors and files checked.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Found {} violation(s) and {} syntax error(s) in {} file(s)",
            self.violations.len(),
            self.file_errors.len(),
            self.files_checked
        )
    }
}

fn position_key(location: &Location) -> (&std::ffi::OsStr, usize, usize) {
    (location.file.as_os_str(), location.line, location.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(file: &str, line: usize, column: usize) -> Violation {
        Violation::new(
            RuleId::Te05,
            Location::new(PathBuf::from(file), line, column),
            "Strings with an ellipsis should use the Unicode \u{2026} character instead of three periods",
        )
    }

    #[test]
    fn violation_carries_rule_code_and_name() {
        let v = make_violation("main.ftl", 3, 9);
        assert_eq!(v.code, "TE05");
        assert_eq!(v.rule, "three-dot-ellipsis");
    }

    #[test]
    fn violation_format_block() {
        let v = make_violation("browser/menu.ftl", 3, 9);
        insta::assert_snapshot!(v.format(), @r"
        File path: browser/menu.ftl
        Position: line 3 column 9
        Error (TE05): Strings with an ellipsis should use the Unicode … character instead of three periods
        ");
    }

    #[test]
    fn violation_display_is_one_line() {
        let v = make_violation("menu.ftl", 3, 9);
        let display = v.to_string();
        assert!(display.starts_with("menu.ftl:3:9: [TE05] "));
        assert!(!display.contains('\n'));
    }

    #[test]
    fn empty_result_has_empty_report() {
        let mut result = LintResult::new();
        result.files_checked = 4;
        assert!(!result.has_problems());
        assert_eq!(result.format_report(), "");
    }

    #[test]
    fn file_errors_count_as_problems() {
        let mut result = LintResult::new();
        result.file_errors.push(FileError::new(
            Location::new(PathBuf::from("broken.ftl"), 1, 5),
            "Expected token: \"=\"",
        ));
        assert!(!result.has_violations());
        assert!(result.has_problems());
        assert!(result.format_report().contains("Syntax error: Expected token"));
    }

    #[test]
    fn sort_orders_by_file_line_column() {
        let mut result = LintResult::new();
        result.violations.push(make_violation("b.ftl", 1, 1));
        result.violations.push(make_violation("a.ftl", 9, 1));
        result.violations.push(make_violation("a.ftl", 2, 7));
        result.violations.push(make_violation("a.ftl", 2, 3));
        result.sort();

        let order: Vec<String> = result.violations.iter().map(ToString::to_string).collect();
        assert!(order[0].starts_with("a.ftl:2:3"));
        assert!(order[1].starts_with("a.ftl:2:7"));
        assert!(order[2].starts_with("a.ftl:9:1"));
        assert!(order[3].starts_with("b.ftl:1:1"));
    }

    #[test]
    fn extend_merges_counts() {
        let mut left = LintResult::new();
        left.files_checked = 1;
        left.violations.push(make_violation("a.ftl", 1, 1));
        let mut right = LintResult::new();
        right.files_checked = 2;
        right.violations.push(make_violation("b.ftl", 1, 1));

        left.extend(right);
        assert_eq!(left.files_checked, 3);
        assert_eq!(left.violations.len(), 2);
    }

    #[test]
    fn report_ends_with_summary() {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(make_violation("a.ftl", 1, 1));
        let report = result.format_report();
        assert!(report.starts_with("File path: a.ftl\n"));
        assert!(report.ends_with(&format!("{}\n", result.summary())));
        assert_eq!(
            result.summary(),
            "Found 1 violation(s) and 0 syntax error(s) in 2 file(s)"
        );
    }
}
