//! Core analyzer for orchestrating lint execution.

use std::path::{Path, PathBuf};

use fluent_lint_syntax::parse;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::context::FileContext;
use crate::position::{PositionError, PositionIndex};
use crate::rule::{Rule, RuleBox};
use crate::types::{FileError, LintResult};

/// Extension of Fluent resource files.
const FTL_EXTENSION: &str = "ftl";

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The root directory does not exist or is not a directory.
    #[error("Root folder not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// IO error reading a file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A file uses CRLF line endings.
    #[error("{}: {source}", path.display())]
    CarriageReturn {
        /// Offending file.
        path: PathBuf,
        /// Where the first `\r` is.
        source: PositionError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory traversal error, e.g. a symlink loop.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory doesn't exist or an exclude
    /// pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        if !root.is_dir() {
            return Err(AnalyzerError::RootNotFound(root));
        }

        let exclude_patterns = self
            .exclude_patterns
            .iter()
            .map(|pattern| glob::Pattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<glob::Pattern>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// Files are processed in sorted order and the result is sorted by file,
    /// line and column, so two runs over the same input give the same output.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, a file cannot be read, or a file
    /// uses CRLF line endings. Files that fail to parse are recorded as
    /// [`FileError`]s and do not stop the run.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let mut result = LintResult::new();
        for path in &files {
            result.extend(self.analyze_file(path)?);
        }
        result.sort();

        info!(
            "Analysis complete: {} violations and {} syntax errors in {} files",
            result.violations.len(),
            result.file_errors.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Reads and checks a single file.
    fn analyze_file(&self, path: &Path) -> Result<LintResult, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.check_source(path, &content)
    }

    /// Checks `content` as if it had been read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content contains `\r`.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<LintResult, AnalyzerError> {
        let positions =
            PositionIndex::new(content).map_err(|source| AnalyzerError::CarriageReturn {
                path: path.to_path_buf(),
                source,
            })?;
        let ctx = FileContext::new(path, &self.root, content, &positions);

        let mut result = LintResult::new();
        result.files_checked = 1;

        let resource = match parse(content) {
            Ok(resource) => resource,
            Err(error) => {
                warn!("Failed to parse {}: {}", path.display(), error);
                result
                    .file_errors
                    .push(FileError::new(ctx.location(error.span), error.to_string()));
                return Ok(result);
            }
        };

        for rule in &self.rules {
            let violations = rule.check(&ctx, &resource);
            debug!(rule = rule.name(), count = violations.len(), "rule finished");
            result.violations.extend(violations);
        }

        Ok(result)
    }

    /// Discovers all `.ftl` files under the root, sorted by path.
    ///
    /// Symbolic links are followed.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry?;
            let path = entry.path();

            let is_ftl = path.extension().and_then(|ext| ext.to_str()) == Some(FTL_EXTENSION);
            if !entry.file_type().is_file() || !is_ftl {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        Ok(files)
    }

    /// Checks if a path matches an exclude pattern, either as given or
    /// relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}
