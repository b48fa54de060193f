//! The Fluent linter: one walk over a resource that runs every check.
//!
//! # Traversal
//!
//! The walk is depth-first and pre-order, so violations come out in
//! document order. Which children are visited is decided per node kind in
//! [`Walk::visit`]:
//!
//! - messages and terms: identifier, value, attributes
//! - attributes: value only; the name comes from the DOM
//! - select expressions: variant values only, never the selector or keys
//! - message, term, function and variable references: nothing, since the
//!   names they use are free-form
//!
//! # State
//!
//! Comment placement depends on what came before, so each file gets a fresh
//! [`TraversalState`] that lives only as long as its walk.

use std::collections::HashSet;

use fluent_lint_core::syntax::{
    Attribute, Comment, Entry, Expression, Identifier, InlineExpression, Pattern, PatternElement,
    Resource, SelectExpression, Span,
};
use fluent_lint_core::{FileContext, Rule, RuleId, RuleSet, Violation};
use tracing::debug;

use crate::identifiers::check_identifier;
use crate::text_quality::TextChecks;

/// Rule name used when registering the linter with an analyzer.
pub const NAME: &str = "fluent-lint";

/// Checks Fluent resources against a [`RuleSet`].
///
/// # Example
///
/// ```
/// use fluent_lint_core::{Analyzer, RuleId, RuleSet};
/// use fluent_lint_rules::FluentLinter;
///
/// let rules = RuleSet::new().with_rule(RuleId::Te05).with_rule(RuleId::Mi01);
/// let analyzer = Analyzer::builder()
///     .root(".")
///     .rule(FluentLinter::new(rules)?)
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FluentLinter {
    rules: RuleSet,
    text: TextChecks,
}

impl FluentLinter {
    /// Creates a linter that reports the rules enabled in `rules`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text patterns fail to compile.
    pub fn new(rules: RuleSet) -> Result<Self, regex::Error> {
        Ok(Self {
            rules,
            text: TextChecks::new()?,
        })
    }
}

impl Rule for FluentLinter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Checks comments, identifiers, syntax features and typography of Fluent files"
    }

    fn check(&self, ctx: &FileContext, resource: &Resource) -> Vec<Violation> {
        let mut walk = Walk {
            linter: self,
            ctx,
            state: TraversalState::default(),
            violations: Vec::new(),
        };
        walk.visit(Node::Resource(resource));

        debug!(
            file = %ctx.relative_path.display(),
            violations = walk.violations.len(),
            "linted file"
        );
        walk.violations
    }
}

/// Per-file state carried through one walk.
#[derive(Debug)]
struct TraversalState {
    /// Cleared by the first message or term.
    resource_comment_allowed: bool,
    /// Set by a group comment, cleared by the next message or term.
    group_comment_pending: bool,
    /// Message ids, and term ids with their leading `-`.
    seen_identifiers: HashSet<String>,
}

impl Default for TraversalState {
    fn default() -> Self {
        Self {
            resource_comment_allowed: true,
            group_comment_pending: false,
            seen_identifiers: HashSet::new(),
        }
    }
}

/// A node the walk can stop at.
#[derive(Clone, Copy)]
enum Node<'a> {
    Resource(&'a Resource),
    Entry { entry: &'a Entry, is_last: bool },
    Identifier(&'a Identifier),
    /// Only the value is walked; attribute names are fixed by the DOM, so
    /// ID01 and ID02 never see them.
    Attribute(&'a Attribute),
    Pattern(&'a Pattern),
    Element(&'a PatternElement),
    Expression(&'a Expression),
    Inline(&'a InlineExpression),
    Select(&'a SelectExpression),
}

struct Walk<'l, 'c> {
    linter: &'l FluentLinter,
    ctx: &'c FileContext<'c>,
    state: TraversalState,
    violations: Vec<Violation>,
}

impl Walk<'_, '_> {
    fn visit(&mut self, node: Node<'_>) {
        match node {
            Node::Resource(resource) => {
                let count = resource.body.len();
                for (i, entry) in resource.body.iter().enumerate() {
                    self.visit(Node::Entry {
                        entry,
                        is_last: i + 1 == count,
                    });
                }
            }

            Node::Entry { entry, is_last } => match entry {
                // Standalone comments may appear anywhere.
                Entry::Comment(_) => {}
                Entry::ResourceComment(comment) => self.resource_comment(comment, is_last),
                Entry::GroupComment(comment) => self.group_comment(comment, is_last),
                Entry::Message(message) => {
                    self.enter_definition(&message.id.name, message.span);
                    self.visit(Node::Identifier(&message.id));
                    if let Some(value) = &message.value {
                        self.visit(Node::Pattern(value));
                    }
                    for attribute in &message.attributes {
                        self.visit(Node::Attribute(attribute));
                    }
                }
                Entry::Term(term) => {
                    self.report(RuleId::Sy01, term.span, "Terms are not supported.");
                    self.enter_definition(&format!("-{}", term.id.name), term.span);
                    self.visit(Node::Identifier(&term.id));
                    self.visit(Node::Pattern(&term.value));
                    for attribute in &term.attributes {
                        self.visit(Node::Attribute(attribute));
                    }
                }
            },

            Node::Identifier(id) => {
                let violations = check_identifier(&self.linter.rules, self.ctx, id);
                self.violations.extend(violations);
            }

            Node::Attribute(attribute) => {
                if self.linter.rules.is_enabled(RuleId::Sy05) {
                    self.report(RuleId::Sy05, attribute.span, "Attributes are not supported.");
                } else {
                    self.visit(Node::Pattern(&attribute.value));
                }
            }

            Node::Pattern(pattern) => {
                for element in &pattern.elements {
                    self.visit(Node::Element(element));
                }
            }

            Node::Element(element) => match element {
                PatternElement::TextElement(text) => {
                    let violations = self.linter.text.check(&self.linter.rules, self.ctx, text);
                    self.violations.extend(violations);
                }
                PatternElement::Placeable(placeable) => {
                    self.visit(Node::Expression(&placeable.expression));
                }
            },

            Node::Expression(expression) => match expression {
                Expression::Inline(inline) => self.visit(Node::Inline(inline)),
                Expression::Select(select) => self.visit(Node::Select(select)),
            },

            Node::Inline(inline) => match inline {
                InlineExpression::MessageReference { span, .. } => {
                    self.report(RuleId::Sy02, *span, "Message references are not supported.");
                }
                InlineExpression::TermReference { span, .. } => {
                    self.report(RuleId::Sy03, *span, "Terms are not supported.");
                }
                InlineExpression::Placeable(placeable) => {
                    self.visit(Node::Expression(&placeable.expression));
                }
                InlineExpression::StringLiteral { .. }
                | InlineExpression::NumberLiteral { .. }
                | InlineExpression::FunctionReference { .. }
                | InlineExpression::VariableReference { .. } => {}
            },

            Node::Select(select) => {
                if self.linter.rules.is_enabled(RuleId::Sy04) && !select.variants.is_empty() {
                    self.report(RuleId::Sy04, select.span, "Variants are not supported.");
                } else {
                    for variant in &select.variants {
                        self.visit(Node::Pattern(&variant.value));
                    }
                }
            }
        }
    }

    /// Bookkeeping shared by messages and terms: closes any open group,
    /// ends the resource comment zone, and records the identifier.
    fn enter_definition(&mut self, key: &str, span: Span) {
        self.state.resource_comment_allowed = false;
        self.state.group_comment_pending = false;

        if !self.state.seen_identifiers.insert(key.to_string()) {
            self.report(
                RuleId::Mi01,
                span,
                format!("Identifier {key} is present more than once in the file."),
            );
        }
    }

    fn resource_comment(&mut self, comment: &Comment, is_last: bool) {
        if !self.state.resource_comment_allowed {
            self.report(
                RuleId::Rc01,
                comment.span,
                "Resource comments (###) should be placed at the top of the file, just \
                 after the license header. There should only be one resource comment \
                 per file.",
            );
            return;
        }

        // A file holding nothing else has no spacing to check.
        if is_last {
            return;
        }

        if self.newlines_after(comment.span) != 2 {
            self.report(
                RuleId::Rc02,
                comment.span,
                "Resource comments (###) should be followed by one empty line.",
            );
            return;
        }

        if comment.span.start > 0 && self.newlines_before(comment.span) != 2 {
            self.report(
                RuleId::Rc03,
                comment.span,
                "Resource comments (###) should have one empty line above them.",
            );
        }
    }

    fn group_comment(&mut self, comment: &Comment, is_last: bool) {
        if self.state.group_comment_pending {
            self.report(
                RuleId::Gc04,
                comment.span,
                "Group comments (##) must be followed by at least one message. Make sure \
                 that a single group comment with multiple paragraphs is not separated by \
                 whitespace, as it will be interpreted as two different comments.",
            );
            return;
        }
        self.state.group_comment_pending = true;

        if is_last {
            // An empty group comment may close the file.
            if !comment.content.is_empty() {
                self.report(
                    RuleId::Gc01,
                    comment.span,
                    "Group comments (##) should not be at the end of the file, they should \
                     always be above a message. Only an empty group comment is allowed at \
                     the end of a file.",
                );
            }
            return;
        }

        if self.newlines_after(comment.span) != 2 {
            self.report(
                RuleId::Gc02,
                comment.span,
                "Group comments (##) should be followed by one empty line.",
            );
            return;
        }

        if comment.span.start > 0 && self.newlines_before(comment.span) != 2 {
            self.report(
                RuleId::Gc03,
                comment.span,
                "Group comments (##) should have an empty line before them.",
            );
        }
    }

    /// Counts the `\n` characters directly after `span`.
    fn newlines_after(&self, span: Span) -> usize {
        self.ctx.content.as_bytes()[span.end..]
            .iter()
            .take_while(|&&b| b == b'\n')
            .count()
    }

    /// Counts the `\n` characters directly before `span`.
    fn newlines_before(&self, span: Span) -> usize {
        self.ctx.content.as_bytes()[..span.start]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\n')
            .count()
    }

    fn report(&mut self, rule: RuleId, span: Span, message: impl Into<String>) {
        if self.linter.rules.is_enabled(rule) {
            self.violations
                .push(Violation::new(rule, self.ctx.location(span), message));
        }
    }
}
