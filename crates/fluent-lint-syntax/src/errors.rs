//! Parser errors.

use crate::Span;

/// A syntax error found while parsing a resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Where it went wrong.
    pub span: Span,
}

impl ParseError {
    /// Creates a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The category of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// No message, term or comment starts here.
    #[error("Expected an entry start")]
    ExpectedEntry,
    /// A specific character was required.
    #[error("Expected token: \"{}\"", .0.escape_default())]
    ExpectedToken(char),
    /// A character from a range was required.
    #[error("Expected a character from range: \"{range}\"")]
    ExpectedCharRange {
        /// Human-readable range, e.g. `a-zA-Z`.
        range: &'static str,
    },
    /// A message has neither a value nor attributes.
    #[error("Expected message \"{entry_id}\" to have a value or attributes")]
    ExpectedMessageField {
        /// Offending message.
        entry_id: String,
    },
    /// A term has no value.
    #[error("Expected term \"-{entry_id}\" to have a value")]
    ExpectedTermField {
        /// Offending term.
        entry_id: String,
    },
    /// An attribute or variant has no value.
    #[error("Expected value")]
    MissingValue,
    /// Function names must be upper-case.
    #[error("Invalid function name: {0}")]
    ForbiddenCallee(String),
    /// Named arguments take string or number literals only.
    #[error("Expected a string or number literal")]
    MissingLiteral,
    /// Only simple identifiers can name an argument.
    #[error("Keyword cannot be used as an argument name")]
    ForbiddenKey,
    /// A select expression has no variants.
    #[error("Expected at least one variant after \"->\"")]
    MissingVariants,
    /// No variant is marked with `*`.
    #[error("Expected one of the variants to be marked as default (*)")]
    MissingDefaultVariant,
    /// More than one variant is marked with `*`.
    #[error("A select expression can only have one default variant")]
    MultipleDefaultVariants,
    /// `{ msg -> ... }`
    #[error("Message references cannot be used as selectors")]
    MessageReferenceAsSelector,
    /// `{ -term -> ... }`
    #[error("Terms cannot be used as selectors")]
    TermReferenceAsSelector,
    /// `{ msg.attr -> ... }`
    #[error("Attributes of messages cannot be used as selectors")]
    MessageAttributeAsSelector,
    /// `{ -term.attr }` outside of a selector.
    #[error("Attributes of terms cannot be used as placeables")]
    TermAttributeAsPlaceable,
    /// `{ { expr } -> ... }`
    #[error("Expected simple expression as selector")]
    ExpectedSimpleExpressionAsSelector,
    /// A string literal runs into the end of the line.
    #[error("Unterminated string literal")]
    UnterminatedStringLiteral,
    /// `FUNC(name: 1, 2)`
    #[error("Positional arguments must not follow named arguments")]
    PositionalArgumentFollowsNamed,
    /// `FUNC(a: 1, a: 2)`
    #[error("The \"{0}\" argument appears twice")]
    DuplicatedNamedArgument(String),
    /// `"\q"`
    #[error("Unknown escape sequence: \\{0}")]
    UnknownEscapeSequence(char),
    /// `"\u12"`
    #[error("Invalid Unicode escape sequence: {0}")]
    InvalidUnicodeEscapeSequence(String),
    /// A `}` outside of any placeable.
    #[error("Unbalanced closing brace in text")]
    UnbalancedClosingBrace,
    /// Nothing that could start an expression.
    #[error("Expected an inline expression")]
    ExpectedInlineExpression,
}
