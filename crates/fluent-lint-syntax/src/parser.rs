//! Recursive-descent parser for Fluent resources.
//!
//! The grammar is small and line-oriented, so the parser works directly on
//! the bytes of the source without a separate tokenizer. All structural
//! characters are ASCII, which keeps every slice on a UTF-8 boundary.

use crate::ast::{
    Attribute, CallArguments, Comment, Entry, Expression, Identifier, InlineExpression, Message,
    NamedArgument, Pattern, PatternElement, Placeable, Resource, SelectExpression, Term,
    TextElement, Variant, VariantKey,
};
use crate::{ErrorKind, ParseError, Span};
use tracing::trace;

/// Parses a complete resource.
///
/// # Errors
///
/// Returns the first syntax error in the source.
pub fn parse(source: &str) -> Result<Resource, ParseError> {
    Parser::new(source).parse()
}

/// Characters that may not start a continuation line of a pattern.
const SPECIAL_LINE_START: &[u8] = b"}.[*";

/// A raw pattern piece, before indentation is removed.
enum Piece {
    Text(String, Span),
    Indent(String, Span),
    Placeable(Placeable),
}

/// Parser state over one source text.
pub struct Parser<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    /// Parses the whole source into a [`Resource`].
    ///
    /// A `#` comment immediately followed by a message or term (no blank
    /// line in between) is attached to that entry.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error in the source.
    pub fn parse(mut self) -> Result<Resource, ParseError> {
        self.skip_blank_block();

        let mut body = Vec::new();
        let mut pending_comment: Option<Comment> = None;

        while !self.is_eof() {
            let entry = self.parse_entry()?;
            self.expect_line_end()?;
            let blank_lines = self.skip_blank_block();
            trace!("Entry at {:?}", entry.span());

            match entry {
                Entry::Comment(comment) if blank_lines == 0 && !self.is_eof() => {
                    if let Some(previous) = pending_comment.replace(comment) {
                        body.push(Entry::Comment(previous));
                    }
                }
                mut entry => {
                    if let Some(comment) = pending_comment.take() {
                        match &mut entry {
                            Entry::Message(message) => {
                                message.span.start = comment.span.start;
                                message.comment = Some(comment);
                            }
                            Entry::Term(term) => {
                                term.span.start = comment.span.start;
                                term.comment = Some(comment);
                            }
                            _ => body.push(Entry::Comment(comment)),
                        }
                    }
                    body.push(entry);
                }
            }
        }

        Ok(Resource {
            body,
            span: Span::new(0, self.source.len()),
        })
    }

    // --- entries ---

    fn parse_entry(&mut self) -> Result<Entry, ParseError> {
        match self.peek() {
            Some(b'#') => self.parse_comment(),
            Some(b'-') => self.parse_term().map(Entry::Term),
            Some(c) if c.is_ascii_alphabetic() => self.parse_message().map(Entry::Message),
            _ => Err(self.error(ErrorKind::ExpectedEntry)),
        }
    }

    fn parse_comment(&mut self) -> Result<Entry, ParseError> {
        let start = self.pos;
        let level = self.bytes[self.pos..]
            .iter()
            .take(3)
            .take_while(|&&b| b == b'#')
            .count();

        let source = self.source;
        let mut lines: Vec<&str> = Vec::new();
        loop {
            self.pos += level;
            match self.peek() {
                None | Some(b'\n') => lines.push(""),
                Some(b' ') => {
                    self.pos += 1;
                    let line_start = self.pos;
                    self.skip_to_line_end();
                    lines.push(&source[line_start..self.pos]);
                }
                Some(_) => return Err(self.error(ErrorKind::ExpectedToken(' '))),
            }

            if !self.is_next_line_comment(level) {
                break;
            }
            self.pos += 1;
        }

        let comment = Comment {
            content: lines.join("\n"),
            span: Span::new(start, self.pos),
        };
        Ok(match level {
            1 => Entry::Comment(comment),
            2 => Entry::GroupComment(comment),
            _ => Entry::ResourceComment(comment),
        })
    }

    /// At a line end, checks whether the next line continues a comment of
    /// the same level.
    fn is_next_line_comment(&self, level: usize) -> bool {
        if self.peek() != Some(b'\n') {
            return false;
        }
        let line = &self.bytes[self.pos + 1..];
        line.len() > level
            && line[..level].iter().all(|&b| b == b'#')
            && matches!(line[level], b' ' | b'\n')
    }

    fn parse_message(&mut self) -> Result<Message, ParseError> {
        let start = self.pos;
        let id = self.parse_identifier()?;
        self.skip_blank_inline();
        self.expect_byte(b'=')?;

        let value = self.maybe_parse_pattern()?;
        let attributes = self.parse_attributes()?;

        if value.is_none() && attributes.is_empty() {
            return Err(ParseError::new(
                ErrorKind::ExpectedMessageField { entry_id: id.name },
                Span::new(start, self.pos),
            ));
        }

        Ok(Message {
            id,
            value,
            attributes,
            comment: None,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let start = self.pos;
        self.expect_byte(b'-')?;
        let id = self.parse_identifier()?;
        self.skip_blank_inline();
        self.expect_byte(b'=')?;

        let Some(value) = self.maybe_parse_pattern()? else {
            return Err(ParseError::new(
                ErrorKind::ExpectedTermField { entry_id: id.name },
                Span::new(start, self.pos),
            ));
        };
        let attributes = self.parse_attributes()?;

        Ok(Term {
            id,
            value,
            attributes,
            comment: None,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes = Vec::new();
        loop {
            let next = self.blank_end(self.pos);
            if self.byte_at(next) != Some(b'.') {
                return Ok(attributes);
            }
            self.pos = next;

            let start = self.pos;
            self.pos += 1;
            let id = self.parse_identifier()?;
            self.skip_blank_inline();
            self.expect_byte(b'=')?;
            let value = self
                .maybe_parse_pattern()?
                .ok_or_else(|| self.error(ErrorKind::MissingValue))?;

            attributes.push(Attribute {
                id,
                value,
                span: Span::new(start, self.pos),
            });
        }
    }

    // --- patterns ---

    /// Parses a pattern starting on the current line (inline) or on one of
    /// the following indented lines (block), or nothing.
    fn maybe_parse_pattern(&mut self) -> Result<Option<Pattern>, ParseError> {
        let inline = self.blank_inline_end(self.pos);
        if !matches!(self.byte_at(inline), None | Some(b'\n')) {
            self.pos = inline;
            return self.parse_pattern(false).map(Some);
        }

        let line_start = self.blank_block_end(inline);
        if self.is_value_continuation(line_start) {
            self.pos = line_start;
            return self.parse_pattern(true).map(Some);
        }

        Ok(None)
    }

    fn parse_pattern(&mut self, block: bool) -> Result<Pattern, ParseError> {
        let start = self.pos;
        let mut pieces = Vec::new();
        let mut common_indent = usize::MAX;

        if block {
            let indent = self.skip_blank_inline();
            pieces.push(Piece::Indent(" ".repeat(indent), Span::new(start, self.pos)));
            common_indent = indent;
        }

        while let Some(byte) = self.peek() {
            match byte {
                b'\n' => {
                    let blank_start = self.pos;
                    let line_start = self.blank_block_end(self.pos);
                    if !self.is_value_continuation(line_start) {
                        break;
                    }
                    let newlines = self.bytes[blank_start..line_start]
                        .iter()
                        .filter(|&&b| b == b'\n')
                        .count();
                    self.pos = line_start;
                    let indent = self.skip_blank_inline();
                    common_indent = common_indent.min(indent);

                    let mut value = "\n".repeat(newlines);
                    value.push_str(&" ".repeat(indent));
                    pieces.push(Piece::Indent(value, Span::new(blank_start, self.pos)));
                }
                b'{' => pieces.push(Piece::Placeable(self.parse_placeable()?)),
                b'}' => return Err(self.error(ErrorKind::UnbalancedClosingBrace)),
                _ => {
                    let text_start = self.pos;
                    while !matches!(self.peek(), None | Some(b'{' | b'}' | b'\n')) {
                        self.pos += 1;
                    }
                    pieces.push(Piece::Text(
                        self.source[text_start..self.pos].to_string(),
                        Span::new(text_start, self.pos),
                    ));
                }
            }
        }

        Ok(Pattern {
            elements: dedent(pieces, common_indent),
            span: Span::new(start, self.pos),
        })
    }

    /// Whether the line starting at `line_start` continues a pattern.
    fn is_value_continuation(&self, line_start: usize) -> bool {
        let indented = self.blank_inline_end(line_start);
        match self.byte_at(indented) {
            Some(b'{') => true,
            Some(b) if indented > line_start => b != b'\n' && !SPECIAL_LINE_START.contains(&b),
            _ => false,
        }
    }

    // --- expressions ---

    fn parse_placeable(&mut self) -> Result<Placeable, ParseError> {
        let start = self.pos;
        self.expect_byte(b'{')?;
        self.skip_blank();
        let expression = self.parse_expression()?;
        self.expect_byte(b'}')?;
        Ok(Placeable {
            expression,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.pos;
        let selector = self.parse_inline_expression()?;
        self.skip_blank();

        if self.starts_with("->") {
            let invalid = match &selector {
                InlineExpression::MessageReference {
                    attribute: None, ..
                } => Some(ErrorKind::MessageReferenceAsSelector),
                InlineExpression::MessageReference { .. } => {
                    Some(ErrorKind::MessageAttributeAsSelector)
                }
                InlineExpression::TermReference {
                    attribute: None, ..
                } => Some(ErrorKind::TermReferenceAsSelector),
                InlineExpression::Placeable(_) => {
                    Some(ErrorKind::ExpectedSimpleExpressionAsSelector)
                }
                _ => None,
            };
            if let Some(kind) = invalid {
                return Err(ParseError::new(kind, selector.span()));
            }

            self.pos += 2;
            self.skip_blank_inline();
            self.expect_line_end()?;
            let variants = self.parse_variants()?;

            return Ok(Expression::Select(SelectExpression {
                selector,
                variants,
                span: Span::new(start, self.pos),
            }));
        }

        if let InlineExpression::TermReference {
            attribute: Some(_),
            span,
            ..
        } = &selector
        {
            return Err(ParseError::new(ErrorKind::TermAttributeAsPlaceable, *span));
        }

        Ok(Expression::Inline(selector))
    }

    fn parse_variants(&mut self) -> Result<Vec<Variant>, ParseError> {
        let mut variants = Vec::new();
        let mut has_default = false;

        self.skip_blank();
        while self.is_variant_start() {
            let variant = self.parse_variant(has_default)?;
            has_default |= variant.default;
            variants.push(variant);
            self.expect_line_end()?;
            self.skip_blank();
        }

        if variants.is_empty() {
            return Err(self.error(ErrorKind::MissingVariants));
        }
        if !has_default {
            return Err(self.error(ErrorKind::MissingDefaultVariant));
        }
        Ok(variants)
    }

    fn is_variant_start(&self) -> bool {
        match self.peek() {
            Some(b'[') => true,
            Some(b'*') => self.byte_at(self.pos + 1) == Some(b'['),
            _ => false,
        }
    }

    fn parse_variant(&mut self, has_default: bool) -> Result<Variant, ParseError> {
        let start = self.pos;
        let default = self.peek() == Some(b'*');
        if default {
            if has_default {
                return Err(self.error(ErrorKind::MultipleDefaultVariants));
            }
            self.pos += 1;
        }

        self.expect_byte(b'[')?;
        self.skip_blank();
        let key = if self.is_number_start() {
            let (value, span) = self.parse_number()?;
            VariantKey::NumberLiteral { value, span }
        } else {
            VariantKey::Identifier(self.parse_identifier()?)
        };
        self.skip_blank();
        self.expect_byte(b']')?;

        let value = self
            .maybe_parse_pattern()?
            .ok_or_else(|| self.error(ErrorKind::MissingValue))?;

        Ok(Variant {
            key,
            value,
            default,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_inline_expression(&mut self) -> Result<InlineExpression, ParseError> {
        let start = self.pos;
        match self.peek() {
            Some(b'{') => Ok(InlineExpression::Placeable(Box::new(
                self.parse_placeable()?,
            ))),
            Some(b'"') => self.parse_string_literal(),
            _ if self.is_number_start() => {
                let (value, span) = self.parse_number()?;
                Ok(InlineExpression::NumberLiteral { value, span })
            }
            Some(b'$') => {
                self.pos += 1;
                let id = self.parse_identifier()?;
                Ok(InlineExpression::VariableReference {
                    id,
                    span: Span::new(start, self.pos),
                })
            }
            Some(b'-') => {
                self.pos += 1;
                let id = self.parse_identifier()?;
                let attribute = self.parse_attribute_accessor()?;
                let after_blank = self.blank_end(self.pos);
                let arguments = if self.byte_at(after_blank) == Some(b'(') {
                    self.pos = after_blank;
                    Some(self.parse_call_arguments()?)
                } else {
                    None
                };
                Ok(InlineExpression::TermReference {
                    id,
                    attribute,
                    arguments,
                    span: Span::new(start, self.pos),
                })
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let id = self.parse_identifier()?;
                let after_blank = self.blank_end(self.pos);
                if self.byte_at(after_blank) == Some(b'(') {
                    if !is_callee(&id.name) {
                        return Err(ParseError::new(
                            ErrorKind::ForbiddenCallee(id.name),
                            id.span,
                        ));
                    }
                    self.pos = after_blank;
                    let arguments = self.parse_call_arguments()?;
                    return Ok(InlineExpression::FunctionReference {
                        id,
                        arguments,
                        span: Span::new(start, self.pos),
                    });
                }
                let attribute = self.parse_attribute_accessor()?;
                Ok(InlineExpression::MessageReference {
                    id,
                    attribute,
                    span: Span::new(start, self.pos),
                })
            }
            _ => Err(self.error(ErrorKind::ExpectedInlineExpression)),
        }
    }

    fn parse_attribute_accessor(&mut self) -> Result<Option<Identifier>, ParseError> {
        if self.peek() != Some(b'.') {
            return Ok(None);
        }
        self.pos += 1;
        self.parse_identifier().map(Some)
    }

    fn parse_call_arguments(&mut self) -> Result<CallArguments, ParseError> {
        let mut arguments = CallArguments::default();

        self.expect_byte(b'(')?;
        self.skip_blank();
        while self.peek() != Some(b')') {
            let expression = self.parse_inline_expression()?;
            self.skip_blank();

            if self.peek() == Some(b':') {
                let span = expression.span();
                let InlineExpression::MessageReference {
                    id,
                    attribute: None,
                    ..
                } = expression
                else {
                    return Err(ParseError::new(ErrorKind::ForbiddenKey, span));
                };
                if arguments.named.iter().any(|arg| arg.name.name == id.name) {
                    return Err(ParseError::new(
                        ErrorKind::DuplicatedNamedArgument(id.name),
                        id.span,
                    ));
                }
                self.pos += 1;
                self.skip_blank();
                let value = self.parse_literal()?;
                arguments.named.push(NamedArgument { name: id, value });
            } else if arguments.named.is_empty() {
                arguments.positional.push(expression);
            } else {
                return Err(ParseError::new(
                    ErrorKind::PositionalArgumentFollowsNamed,
                    expression.span(),
                ));
            }

            self.skip_blank();
            if self.peek() != Some(b',') {
                break;
            }
            self.pos += 1;
            self.skip_blank();
        }
        self.expect_byte(b')')?;

        Ok(arguments)
    }

    fn parse_literal(&mut self) -> Result<InlineExpression, ParseError> {
        if self.is_number_start() {
            let (value, span) = self.parse_number()?;
            return Ok(InlineExpression::NumberLiteral { value, span });
        }
        if self.peek() == Some(b'"') {
            return self.parse_string_literal();
        }
        Err(self.error(ErrorKind::MissingLiteral))
    }

    fn parse_string_literal(&mut self) -> Result<InlineExpression, ParseError> {
        let start = self.pos;
        self.expect_byte(b'"')?;

        let mut value = String::new();
        loop {
            let chunk_start = self.pos;
            while !matches!(self.peek(), None | Some(b'"' | b'\\' | b'\n')) {
                self.pos += 1;
            }
            value.push_str(&self.source[chunk_start..self.pos]);

            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => value.push(self.parse_escape()?),
                _ => {
                    return Err(ParseError::new(
                        ErrorKind::UnterminatedStringLiteral,
                        Span::new(start, self.pos),
                    ))
                }
            }
        }

        Ok(InlineExpression::StringLiteral {
            value,
            span: Span::new(start, self.pos),
        })
    }

    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let start = self.pos;
        self.pos += 1;
        match self.peek() {
            Some(b'\\') => {
                self.pos += 1;
                Ok('\\')
            }
            Some(b'"') => {
                self.pos += 1;
                Ok('"')
            }
            Some(b'u') => self.parse_unicode_escape(start, 4),
            Some(b'U') => self.parse_unicode_escape(start, 6),
            _ => match self.source[self.pos..].chars().next() {
                Some(c) => Err(ParseError::new(
                    ErrorKind::UnknownEscapeSequence(c),
                    Span::new(start, self.pos + c.len_utf8()),
                )),
                None => Err(ParseError::new(
                    ErrorKind::UnterminatedStringLiteral,
                    Span::new(start, self.pos),
                )),
            },
        }
    }

    fn parse_unicode_escape(&mut self, start: usize, digits: usize) -> Result<char, ParseError> {
        self.pos += 1;
        let hex_start = self.pos;
        while self.pos - hex_start < digits && self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
            self.pos += 1;
        }

        let hex = &self.source[hex_start..self.pos];
        if hex.len() != digits {
            return Err(ParseError::new(
                ErrorKind::InvalidUnicodeEscapeSequence(self.source[start..self.pos].to_string()),
                Span::new(start, self.pos),
            ));
        }

        Ok(u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn is_number_start(&self) -> bool {
        match self.peek() {
            Some(b'-') => self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()),
            Some(b) => b.is_ascii_digit(),
            None => false,
        }
    }

    fn parse_number(&mut self) -> Result<(String, Span), ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.skip_digits()?;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.skip_digits()?;
        }
        Ok((
            self.source[start..self.pos].to_string(),
            Span::new(start, self.pos),
        ))
    }

    fn skip_digits(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error(ErrorKind::ExpectedCharRange { range: "0-9" }));
        }
        Ok(())
    }

    fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let start = self.pos;
        if !self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            return Err(self.error(ErrorKind::ExpectedCharRange { range: "a-zA-Z" }));
        }
        self.pos += 1;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            self.pos += 1;
        }
        Ok(Identifier {
            name: self.source[start..self.pos].to_string(),
            span: Span::new(start, self.pos),
        })
    }

    // --- low-level helpers ---

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    fn starts_with(&self, prefix: &str) -> bool {
        self.bytes[self.pos..].starts_with(prefix.as_bytes())
    }

    /// An error of `kind` at the current position.
    fn error(&self, kind: ErrorKind) -> ParseError {
        let end = (self.pos + 1).min(self.bytes.len());
        ParseError::new(kind, Span::new(self.pos, end))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(ErrorKind::ExpectedToken(char::from(expected))))
        }
    }

    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(b'\n') => {
                self.pos += 1;
                Ok(())
            }
            None => Ok(()),
            Some(_) => Err(self.error(ErrorKind::ExpectedToken('\n'))),
        }
    }

    fn skip_to_line_end(&mut self) {
        while !matches!(self.peek(), None | Some(b'\n')) {
            self.pos += 1;
        }
    }

    /// Skips spaces; returns how many were skipped.
    fn skip_blank_inline(&mut self) -> usize {
        let start = self.pos;
        self.pos = self.blank_inline_end(self.pos);
        self.pos - start
    }

    /// Skips spaces and line ends.
    fn skip_blank(&mut self) {
        self.pos = self.blank_end(self.pos);
    }

    /// Skips whole blank lines; returns how many were skipped.
    fn skip_blank_block(&mut self) -> usize {
        let start = self.pos;
        self.pos = self.blank_block_end(self.pos);
        self.bytes[start..self.pos]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    }

    fn blank_inline_end(&self, mut pos: usize) -> usize {
        while self.byte_at(pos) == Some(b' ') {
            pos += 1;
        }
        pos
    }

    fn blank_end(&self, mut pos: usize) -> usize {
        while matches!(self.byte_at(pos), Some(b' ' | b'\n')) {
            pos += 1;
        }
        pos
    }

    /// Returns the start of the first line at or after `pos` that is not
    /// blank. Trailing spaces at the end of input are consumed.
    fn blank_block_end(&self, mut pos: usize) -> usize {
        loop {
            let line_start = pos;
            pos = self.blank_inline_end(pos);
            match self.byte_at(pos) {
                Some(b'\n') => pos += 1,
                None => return pos,
                Some(_) => return line_start,
            }
        }
    }
}

/// Function names are upper-case identifiers.
fn is_callee(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Removes the common indentation from the pattern pieces, joins adjacent
/// text and trims trailing whitespace from the last element.
fn dedent(pieces: Vec<Piece>, common_indent: usize) -> Vec<PatternElement> {
    let mut elements: Vec<PatternElement> = Vec::new();

    for piece in pieces {
        let (value, span) = match piece {
            Piece::Placeable(placeable) => {
                elements.push(PatternElement::Placeable(placeable));
                continue;
            }
            Piece::Text(value, span) => (value, span),
            Piece::Indent(mut value, span) => {
                value.truncate(value.len().saturating_sub(common_indent));
                if value.is_empty() {
                    continue;
                }
                (value, span)
            }
        };

        if let Some(PatternElement::TextElement(previous)) = elements.last_mut() {
            previous.value.push_str(&value);
            previous.span = previous.span.extend(span);
            continue;
        }
        elements.push(PatternElement::TextElement(TextElement { value, span }));
    }

    if let Some(PatternElement::TextElement(last)) = elements.last_mut() {
        let trimmed = last.value.trim_end_matches([' ', '\n']).len();
        last.value.truncate(trimmed);
        if last.value.is_empty() {
            elements.pop();
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(source: &str) -> Message {
        let resource = parse(source).expect("should parse");
        match resource.body.into_iter().next() {
            Some(Entry::Message(message)) => message,
            other => panic!("expected a message, got {other:?}"),
        }
    }

    fn text_values(pattern: &Pattern) -> Vec<&str> {
        pattern
            .elements
            .iter()
            .filter_map(|element| match element {
                PatternElement::TextElement(text) => Some(text.value.as_str()),
                PatternElement::Placeable(_) => None,
            })
            .collect()
    }

    #[test]
    fn parses_simple_message() {
        let source = "hello = Hello world\n";
        let msg = message(source);
        assert_eq!(msg.id.name, "hello");
        assert_eq!(msg.id.span, Span::new(0, 5));
        assert_eq!(msg.span, Span::new(0, 19));
        let value = msg.value.expect("value");
        assert_eq!(text_values(&value), vec!["Hello world"]);
        assert_eq!(value.elements[0].span().slice(source), "Hello world");
    }

    #[test]
    fn parses_placeables_and_references() {
        let msg = message(
            "m = { $user } uses { -brand } and { other.attr } { NUMBER($n, style: \"percent\") }\n",
        );
        let value = msg.value.expect("value");
        let kinds: Vec<&str> = value
            .elements
            .iter()
            .filter_map(|element| match element {
                PatternElement::Placeable(Placeable {
                    expression: Expression::Inline(inline),
                    ..
                }) => Some(match inline {
                    InlineExpression::VariableReference { .. } => "variable",
                    InlineExpression::TermReference { .. } => "term",
                    InlineExpression::MessageReference { .. } => "message",
                    InlineExpression::FunctionReference { .. } => "function",
                    _ => "other",
                }),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec!["variable", "term", "message", "function"]);
    }

    #[test]
    fn dedents_multiline_block_pattern() {
        let msg = message("multi =\n    First line\n      indented\n    Last\n");
        let value = msg.value.expect("value");
        assert_eq!(text_values(&value), vec!["First line\n  indented\nLast"]);
    }

    #[test]
    fn inline_pattern_continues_on_indented_lines() {
        let msg = message("key = Start\n    continued\n");
        let value = msg.value.expect("value");
        assert_eq!(text_values(&value), vec!["Start\ncontinued"]);
    }

    #[test]
    fn parses_attributes_without_value() {
        let msg = message("button =\n    .label = Save\n    .accesskey = S\n");
        assert!(msg.value.is_none());
        let names: Vec<&str> = msg.attributes.iter().map(|a| a.id.name.as_str()).collect();
        assert_eq!(names, vec!["label", "accesskey"]);
    }

    #[test]
    fn parses_select_expression() {
        let source = "emails = { $count ->\n    [one] One email\n   *[other] { $count } emails\n}\n";
        let msg = message(source);
        let value = msg.value.expect("value");
        let PatternElement::Placeable(Placeable {
            expression: Expression::Select(select),
            ..
        }) = &value.elements[0]
        else {
            panic!("expected a select expression");
        };
        assert_eq!(select.variants.len(), 2);
        assert!(!select.variants[0].default);
        assert!(select.variants[1].default);
        assert!(matches!(
            &select.variants[0].key,
            VariantKey::Identifier(id) if id.name == "one"
        ));
    }

    #[test]
    fn joins_comment_lines_and_classifies_levels() {
        let source = "### Resource\n### comment\n\n## Group\n\n# Standalone\n\nkey = value\n";
        let resource = parse(source).expect("should parse");
        assert_eq!(resource.body.len(), 4);
        match &resource.body[0] {
            Entry::ResourceComment(comment) => {
                assert_eq!(comment.content, "Resource\ncomment");
                assert_eq!(comment.span, Span::new(0, 24));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(resource.body[1], Entry::GroupComment(_)));
        assert!(matches!(resource.body[2], Entry::Comment(_)));
    }

    #[test]
    fn attaches_comment_directly_above_message() {
        let source = "# Note\nkey = value\n";
        let resource = parse(source).expect("should parse");
        assert_eq!(resource.body.len(), 1);
        let Entry::Message(msg) = &resource.body[0] else {
            panic!("expected message");
        };
        assert_eq!(msg.comment.as_ref().map(|c| c.content.as_str()), Some("Note"));
        assert_eq!(msg.span.start, 0);
        assert_eq!(msg.id.span.start, 7);
    }

    #[test]
    fn parses_term_with_attributes() {
        let source = "-brand = Firefox\n    .gender = masculine\n";
        let resource = parse(source).expect("should parse");
        let Entry::Term(term) = &resource.body[0] else {
            panic!("expected term");
        };
        assert_eq!(term.id.name, "brand");
        assert_eq!(term.id.span, Span::new(1, 6));
        assert_eq!(term.attributes.len(), 1);
    }

    #[test]
    fn unescapes_string_literals() {
        let msg = message("quote = { \"\\u0041\\\"b\" }\n");
        let value = msg.value.expect("value");
        let PatternElement::Placeable(Placeable {
            expression: Expression::Inline(InlineExpression::StringLiteral { value, .. }),
            ..
        }) = &value.elements[0]
        else {
            panic!("expected a string literal");
        };
        assert_eq!(value, "A\"b");
    }

    #[test]
    fn rejects_message_without_value() {
        let err = parse("empty =\n").expect_err("should fail");
        assert!(matches!(err.kind, ErrorKind::ExpectedMessageField { .. }));
    }

    #[test]
    fn rejects_missing_default_variant() {
        let err = parse("m = { $n ->\n    [one] One\n}\n").expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::MissingDefaultVariant);
    }

    #[test]
    fn rejects_lowercase_function() {
        let err = parse("m = { number($n) }\n").expect_err("should fail");
        assert!(matches!(err.kind, ErrorKind::ForbiddenCallee(_)));
    }

    #[test]
    fn rejects_unbalanced_brace() {
        let err = parse("m = oops }\n").expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::UnbalancedClosingBrace);
        assert_eq!(err.span.start, 9);
    }

    #[test]
    fn rejects_garbage_entry() {
        let err = parse("key = value\n!bad\n").expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::ExpectedEntry);
        assert_eq!(err.span.start, 12);
    }

    #[test]
    fn empty_source_is_empty_resource() {
        let resource = parse("").expect("should parse");
        assert!(resource.body.is_empty());
        let resource = parse("\n\n   \n").expect("should parse");
        assert!(resource.body.is_empty());
    }
}
