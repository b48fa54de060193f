//! Context types for rule execution.

use std::path::{Path, PathBuf};

use fluent_lint_syntax::Span;

use crate::position::PositionIndex;
use crate::types::Location;

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// Path relative to the checked root; used in reports.
    pub relative_path: PathBuf,
    /// File contents as a string.
    pub content: &'a str,
    /// Line index of `content`.
    pub positions: &'a PositionIndex,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path, content: &'a str, positions: &'a PositionIndex) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
            content,
            positions,
        }
    }

    /// Resolves a span to a reportable location at its start.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        let (line, column) = self.positions.resolve(span.start);
        Location::new(self.relative_path.clone(), line, column).with_span(span.start, span.len())
    }
}
