//! # fluent-lint-rules
//!
//! The checks run by fluent-lint, bundled into a single [`FluentLinter`]
//! rule that walks each resource once.
//!
//! ## Available Rules
//!
//! | Code | Checks |
//! |------|--------|
//! | RC01 | Resource comments (`###`) are at the top of the file |
//! | RC02 | Resource comments are followed by one empty line |
//! | RC03 | Resource comments are preceded by one empty line |
//! | GC01 | Only an empty group comment (`##`) may end the file |
//! | GC02 | Group comments are followed by one empty line |
//! | GC03 | Group comments are preceded by one empty line |
//! | GC04 | Group comments are followed by at least one message |
//! | MI01 | Identifiers are unique within a file |
//! | ID01 | Identifiers only use `[a-z0-9-]` |
//! | ID02 | Identifiers have a minimum length |
//! | SY01 | No term definitions |
//! | SY02 | No message references |
//! | SY03 | No term references |
//! | SY04 | No select expressions |
//! | SY05 | No attributes |
//! | TE01 | `’` instead of a straight apostrophe |
//! | TE02 | `’` instead of `‘` as an apostrophe |
//! | TE03 | `‘’` instead of straight single quotes |
//! | TE04 | `“”` instead of straight double quotes |
//! | TE05 | `…` instead of three periods |
//!
//! Which rules report is decided by the [`RuleSet`](fluent_lint_core::RuleSet)
//! the linter is built with.

mod identifiers;
mod linter;
mod markup;
mod text_quality;

pub use identifiers::is_valid_identifier;
pub use linter::{FluentLinter, NAME};
pub use markup::text_runs;

/// Re-export core types for convenience.
pub use fluent_lint_core::{Rule, RuleId, RuleSet, Violation};
