//! Shared output formatting for lint results.

use anyhow::Result;
use fluent_lint_core::{FileError, LintResult, SyntaxDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the checked directory; report paths are relative to it.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, root),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult, root: &Path) {
    if !result.has_problems() {
        return;
    }

    for error in &result.file_errors {
        print_file_error(error, root);
    }

    for violation in &result.violations {
        println!("{}", violation.format());
    }

    println!("{}", result.summary());
}

/// Renders a syntax error with its source snippet, or as a plain block when
/// the file can no longer be read.
fn print_file_error(error: &FileError, root: &Path) {
    let path = root.join(&error.location.file);
    match std::fs::read_to_string(&path) {
        Ok(source) => {
            let report = miette::Report::new(SyntaxDiagnostic::new(error, source));
            eprintln!("{report:?}");
        }
        Err(e) => {
            tracing::debug!("Cannot re-read {}: {e}", path.display());
            println!("{}", error.format());
        }
    }
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for error in &result.file_errors {
        println!("{error}");
    }
    for violation in &result.violations {
        println!("{violation}");
    }
}
