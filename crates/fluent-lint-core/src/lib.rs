//! # fluent-lint-core
//!
//! Core framework for linting Fluent (`.ftl`) localization resources.
//!
//! This crate provides the pieces every lint run is built from:
//!
//! - [`PositionIndex`] for turning byte offsets into line/column pairs
//! - [`Config`] and the resolved, typed [`RuleSet`]
//! - [`RuleId`] for the catalogue of rule codes
//! - [`Rule`] trait implemented by lint engines
//! - [`Analyzer`] for discovering files and orchestrating lint execution
//! - [`Violation`], [`FileError`] and [`LintResult`] for the findings
//!
//! ## Example
//!
//! ```ignore
//! use fluent_lint_core::{Analyzer, Config};
//!
//! let rules = Config::from_file("config.yml".as_ref())?.rule_set()?;
//! let analyzer = Analyzer::builder()
//!     .root("./locales/en-US")
//!     .rule(MyRule::new(rules))
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod position;
mod rule;
mod rule_id;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Config, ConfigError, Exclusions, RuleConfig, RuleSet};
pub use context::FileContext;
pub use position::{PositionError, PositionIndex};
pub use rule::{Rule, RuleBox};
pub use rule_id::{RuleCategory, RuleId, UnknownRuleId};
pub use types::{FileError, LintResult, Location, SyntaxDiagnostic, Violation};

/// Re-export of the syntax crate, so rule crates share one AST version.
pub use fluent_lint_syntax as syntax;
