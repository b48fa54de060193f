//! # fluent-lint-syntax
//!
//! A span-preserving parser for Fluent localization resources (`.ftl`).
//!
//! Every node of the produced [`Resource`] carries a [`Span`] of byte offsets
//! into the original source, which is what the linter needs to report
//! positions. The parser is strict: the first syntax error aborts parsing of
//! the whole resource and is returned as a [`ParseError`].
//!
//! ```
//! use fluent_lint_syntax::{parse, Entry};
//!
//! let resource = parse("hello = Hello, { $name }!\n").unwrap();
//! assert!(matches!(resource.body[0], Entry::Message(_)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod errors;
mod parser;
mod span;

pub use ast::{
    Attribute, CallArguments, Comment, Entry, Expression, Identifier, InlineExpression, Message,
    NamedArgument, Pattern, PatternElement, Placeable, Resource, SelectExpression, Term,
    TextElement, Variant, VariantKey,
};
pub use errors::{ErrorKind, ParseError};
pub use parser::{parse, Parser};
pub use span::Span;
