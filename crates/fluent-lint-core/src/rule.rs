//! Rule traits for defining lint rules.

use fluent_lint_syntax::Resource;

use crate::context::FileContext;
use crate::types::Violation;

/// A per-file lint rule over the Fluent AST.
///
/// # Example
///
/// ```
/// use fluent_lint_core::syntax::{Entry, Resource};
/// use fluent_lint_core::{FileContext, Rule, RuleId, Violation};
///
/// struct NoTerms;
///
/// impl Rule for NoTerms {
///     fn name(&self) -> &'static str { "no-terms" }
///
///     fn check(&self, ctx: &FileContext, resource: &Resource) -> Vec<Violation> {
///         resource
///             .body
///             .iter()
///             .filter_map(|entry| match entry {
///                 Entry::Term(term) => Some(Violation::new(
///                     RuleId::Sy01,
///                     ctx.location(term.span),
///                     "Terms are not supported.",
///                 )),
///                 _ => None,
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single parsed file and returns any violations found.
    fn check(&self, ctx: &FileContext, resource: &Resource) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::PositionIndex;
    use crate::rule_id::RuleId;
    use std::path::Path;

    struct FirstEntry;

    impl Rule for FirstEntry {
        fn name(&self) -> &'static str {
            "first-entry"
        }

        fn check(&self, ctx: &FileContext, resource: &Resource) -> Vec<Violation> {
            resource
                .body
                .first()
                .map(|entry| Violation::new(RuleId::Mi01, ctx.location(entry.span()), "first"))
                .into_iter()
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let source = "\nkey = value\n";
        let positions = PositionIndex::new(source).unwrap();
        let resource = fluent_lint_syntax::parse(source).unwrap();
        let ctx = FileContext::new(Path::new("/l10n/a.ftl"), Path::new("/l10n"), source, &positions);

        let rule: RuleBox = Box::new(FirstEntry);
        assert_eq!(rule.name(), "first-entry");
        assert_eq!(rule.description(), "");

        let violations = rule.check(&ctx, &resource);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.column, 1);
    }
}
