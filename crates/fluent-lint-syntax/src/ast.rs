//! Abstract syntax tree for Fluent resources.
//!
//! The shape follows the Fluent 1.0 data model. Unlike a runtime AST, every
//! node owns its text and records the [`Span`] it was parsed from, so the
//! tree can outlive the source buffer and still be mapped back to it.

use crate::Span;

/// The root of a parsed `.ftl` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Top-level entries in document order.
    pub body: Vec<Entry>,
    /// Always covers the whole source text.
    pub span: Span,
}

/// A top-level entry of a [`Resource`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// `id = ...`
    Message(Message),
    /// `-id = ...`
    Term(Term),
    /// A standalone `#` comment.
    Comment(Comment),
    /// A `##` comment introducing a group of messages.
    GroupComment(Comment),
    /// A `###` comment describing the whole file.
    ResourceComment(Comment),
}

impl Entry {
    /// Returns the span of the entry.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Message(message) => message.span,
            Self::Term(term) => term.span,
            Self::Comment(comment) | Self::GroupComment(comment) | Self::ResourceComment(comment) => {
                comment.span
            }
        }
    }

    /// Whether the entry is any of the three comment kinds.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            Self::Comment(_) | Self::GroupComment(_) | Self::ResourceComment(_)
        )
    }
}

/// A public message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Message identifier.
    pub id: Identifier,
    /// Value; may be absent when the message only has attributes.
    pub value: Option<Pattern>,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// A `#` comment directly above the message.
    pub comment: Option<Comment>,
    /// Starts at the attached comment, if any.
    pub span: Span,
}

/// A private term, only usable through references.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// Term identifier, without the leading `-`.
    pub id: Identifier,
    /// Terms always have a value.
    pub value: Pattern,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// A `#` comment directly above the term.
    pub comment: Option<Comment>,
    /// Starts at the attached comment, if any.
    pub span: Span,
}

/// `.name = value` below a message or term.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name.
    pub id: Identifier,
    /// Attribute value.
    pub value: Pattern,
    /// Source span.
    pub span: Span,
}

/// A name as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The identifier text.
    pub name: String,
    /// Source span.
    pub span: Span,
}

/// Comment content with the `#` markers and the following space removed.
/// Lines of a multi-line comment are joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text.
    pub content: String,
    /// Source span, excluding the final line terminator.
    pub span: Span,
}

/// A sequence of text and placeables.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    /// Elements after indentation has been removed.
    pub elements: Vec<PatternElement>,
    /// Source span.
    pub span: Span,
}

/// One element of a [`Pattern`].
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    /// Literal text.
    TextElement(TextElement),
    /// `{ expression }`
    Placeable(Placeable),
}

impl PatternElement {
    /// Returns the span of the element.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::TextElement(text) => text.span,
            Self::Placeable(placeable) => placeable.span,
        }
    }
}

/// Literal text inside a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    /// Dedented text; may span several source lines.
    pub value: String,
    /// Source span.
    pub span: Span,
}

/// `{ expression }`, including the braces.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeable {
    /// The wrapped expression.
    pub expression: Expression,
    /// Source span.
    pub span: Span,
}

/// The content of a placeable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A single inline expression.
    Inline(InlineExpression),
    /// `selector -> variants`
    Select(SelectExpression),
}

impl Expression {
    /// Returns the span of the expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Inline(inline) => inline.span(),
            Self::Select(select) => select.span,
        }
    }
}

/// Expressions that may appear inline, as selectors, or as call arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineExpression {
    /// `"text"`, with escapes resolved.
    StringLiteral {
        /// Unescaped value.
        value: String,
        /// Source span, including the quotes.
        span: Span,
    },
    /// `-12.5`
    NumberLiteral {
        /// Number as written.
        value: String,
        /// Source span.
        span: Span,
    },
    /// `FUNC(args)`
    FunctionReference {
        /// Function name.
        id: Identifier,
        /// Call arguments.
        arguments: CallArguments,
        /// Source span.
        span: Span,
    },
    /// `message` or `message.attr`
    MessageReference {
        /// Referenced message.
        id: Identifier,
        /// Referenced attribute.
        attribute: Option<Identifier>,
        /// Source span.
        span: Span,
    },
    /// `-term`, `-term.attr` or `-term(args)`
    TermReference {
        /// Referenced term, without the leading `-`.
        id: Identifier,
        /// Referenced attribute.
        attribute: Option<Identifier>,
        /// Parameters passed to the term.
        arguments: Option<CallArguments>,
        /// Source span.
        span: Span,
    },
    /// `$variable`
    VariableReference {
        /// Variable name, without the leading `$`.
        id: Identifier,
        /// Source span.
        span: Span,
    },
    /// A nested placeable, `{ { expr } }`.
    Placeable(Box<Placeable>),
}

impl InlineExpression {
    /// Returns the span of the expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::StringLiteral { span, .. }
            | Self::NumberLiteral { span, .. }
            | Self::FunctionReference { span, .. }
            | Self::MessageReference { span, .. }
            | Self::TermReference { span, .. }
            | Self::VariableReference { span, .. } => *span,
            Self::Placeable(placeable) => placeable.span,
        }
    }
}

/// Arguments of a function or term call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments {
    /// Positional arguments.
    pub positional: Vec<InlineExpression>,
    /// `name: literal` arguments.
    pub named: Vec<NamedArgument>,
}

/// `name: literal`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    /// Argument name.
    pub name: Identifier,
    /// A string or number literal.
    pub value: InlineExpression,
}

/// `{ $count -> [one] ... *[other] ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectExpression {
    /// Value that picks the variant.
    pub selector: InlineExpression,
    /// At least one variant, exactly one of them default.
    pub variants: Vec<Variant>,
    /// Source span.
    pub span: Span,
}

/// `[key] value`, or `*[key] value` for the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Variant key.
    pub key: VariantKey,
    /// Variant value.
    pub value: Pattern,
    /// Whether this is the `*` variant.
    pub default: bool,
    /// Source span.
    pub span: Span,
}

/// The key between square brackets of a [`Variant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantKey {
    /// `[other]`
    Identifier(Identifier),
    /// `[1]`
    NumberLiteral {
        /// Number as written.
        value: String,
        /// Source span.
        span: Span,
    },
}
