//! Integration tests for file discovery and per-file analysis.

use std::fs;
use std::path::Path;

use fluent_lint_core::syntax::{Entry, Resource};
use fluent_lint_core::{Analyzer, AnalyzerError, FileContext, Rule, RuleId, Violation};
use tempfile::TempDir;

/// Reports every term definition.
struct TermsAreUnsupported;

impl Rule for TermsAreUnsupported {
    fn name(&self) -> &'static str {
        "terms-are-unsupported"
    }

    fn check(&self, ctx: &FileContext, resource: &Resource) -> Vec<Violation> {
        resource
            .body
            .iter()
            .filter_map(|entry| match entry {
                Entry::Term(term) => Some(Violation::new(
                    RuleId::Sy01,
                    ctx.location(term.span),
                    "Terms are not supported.",
                )),
                _ => None,
            })
            .collect()
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "en-US/b.ftl", "-brand = Firefox\n");
    write(dir.path(), "en-US/a.ftl", "hello = Hello\n\n-term = Term\n");
    write(dir.path(), "en-US/nested/c.ftl", "ok = fine\n");
    write(dir.path(), "en-US/notes.txt", "-not = fluent\n");
    dir
}

#[test]
fn discovers_only_ftl_files_in_sorted_order() {
    let dir = fixture();
    let analyzer = Analyzer::builder().root(dir.path()).build().unwrap();

    let files: Vec<_> = analyzer
        .discover_files()
        .unwrap()
        .into_iter()
        .map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();

    assert_eq!(
        files,
        vec![
            Path::new("en-US/a.ftl").to_path_buf(),
            Path::new("en-US/b.ftl").to_path_buf(),
            Path::new("en-US/nested/c.ftl").to_path_buf(),
        ]
    );
}

#[test]
fn reports_violations_with_relative_paths() {
    let dir = fixture();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(TermsAreUnsupported)
        .build()
        .unwrap();

    let result = analyzer.analyze().unwrap();
    assert_eq!(result.files_checked, 3);
    assert_eq!(result.violations.len(), 2);

    let first = &result.violations[0];
    assert_eq!(first.code, "SY01");
    assert_eq!(first.location.file, Path::new("en-US/a.ftl"));
    assert_eq!((first.location.line, first.location.column), (3, 1));

    let second = &result.violations[1];
    assert_eq!(second.location.file, Path::new("en-US/b.ftl"));
    assert_eq!((second.location.line, second.location.column), (1, 1));
}

#[test]
fn exclude_patterns_skip_files() {
    let dir = fixture();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(TermsAreUnsupported)
        .exclude("**/b.ftl")
        .build()
        .unwrap();

    let result = analyzer.analyze().unwrap();
    assert_eq!(result.files_checked, 2);
    assert_eq!(result.violations.len(), 1);
}

#[test]
fn parse_errors_do_not_stop_the_run() {
    let dir = fixture();
    write(dir.path(), "en-US/broken.ftl", "this is not fluent\n");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(TermsAreUnsupported)
        .build()
        .unwrap();

    let result = analyzer.analyze().unwrap();
    assert_eq!(result.files_checked, 4);
    assert_eq!(result.violations.len(), 2);
    assert_eq!(result.file_errors.len(), 1);
    assert_eq!(
        result.file_errors[0].location.file,
        Path::new("en-US/broken.ftl")
    );
    assert!(result.has_problems());
}

#[test]
fn crlf_aborts_the_run() {
    let dir = fixture();
    write(dir.path(), "en-US/windows.ftl", "key = value\r\n");

    let analyzer = Analyzer::builder().root(dir.path()).build().unwrap();
    let err = analyzer.analyze().unwrap_err();
    assert!(matches!(err, AnalyzerError::CarriageReturn { .. }));
    assert!(err.to_string().contains("windows.ftl"));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = fixture();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(TermsAreUnsupported)
        .build()
        .unwrap();

    let first = analyzer.analyze().unwrap().format_report();
    let second = analyzer.analyze().unwrap().format_report();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn clean_tree_has_empty_report() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.ftl", "hello = Hello\n");

    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(TermsAreUnsupported)
        .build()
        .unwrap();

    let result = analyzer.analyze().unwrap();
    assert!(!result.has_problems());
    assert_eq!(result.format_report(), "");
}
