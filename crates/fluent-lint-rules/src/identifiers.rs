//! Identifier checks (ID01, ID02).
//!
//! Both rules can be switched off for individual files or identifiers
//! through their `exclusions`.

use fluent_lint_core::syntax::Identifier;
use fluent_lint_core::{FileContext, RuleId, RuleSet, Violation};

const INVALID_CHARACTERS: &str = "Identifiers may only contain lowercase characters and -";

/// Whether `name` only uses lowercase ASCII letters, digits and `-`.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Runs the enabled identifier checks on the id of a message or term.
pub(crate) fn check_identifier(
    rules: &RuleSet,
    ctx: &FileContext,
    id: &Identifier,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let applies =
        |rule: RuleId| rules.is_enabled(rule) && !rules.is_excluded(rule, ctx.path, &id.name);

    if applies(RuleId::Id01) && !is_valid_identifier(&id.name) {
        violations.push(Violation::new(
            RuleId::Id01,
            ctx.location(id.span),
            INVALID_CHARACTERS,
        ));
    }

    let min_length = rules.id_min_length();
    if applies(RuleId::Id02) && id.name.chars().count() < min_length {
        violations.push(Violation::new(
            RuleId::Id02,
            ctx.location(id.span),
            format!("Identifiers must be at least {min_length} characters long"),
        ));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_lint_core::syntax::Span;
    use fluent_lint_core::{Exclusions, PositionIndex};
    use std::path::Path;

    fn identifier(name: &str) -> Identifier {
        Identifier {
            name: name.to_string(),
            span: Span::new(0, name.len()),
        }
    }

    fn run(rules: &RuleSet, path: &str, name: &str) -> Vec<String> {
        let positions = PositionIndex::default();
        let ctx = FileContext::new(Path::new(path), Path::new("/l10n"), "", &positions);
        check_identifier(rules, &ctx, &identifier(name))
            .into_iter()
            .map(|v| v.code)
            .collect()
    }

    #[test]
    fn valid_identifiers() {
        assert!(is_valid_identifier("about-dialog-title2"));
        assert!(!is_valid_identifier("aboutDialog"));
        assert!(!is_valid_identifier("about_dialog"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn format_check() {
        let rules = RuleSet::new().with_rule(RuleId::Id01);
        assert_eq!(run(&rules, "/l10n/a.ftl", "camelCase"), vec!["ID01"]);
        assert!(run(&rules, "/l10n/a.ftl", "kebab-case").is_empty());
    }

    #[test]
    fn length_check_with_exclusions() {
        let rules = RuleSet::new()
            .with_rule(RuleId::Id02)
            .with_min_length(3)
            .with_exclusions(
                RuleId::Id02,
                Exclusions {
                    files: vec!["legacy/old.ftl".to_string()],
                    messages: vec!["ok".to_string()],
                },
            );

        assert!(run(&rules, "/l10n/a.ftl", "ok").is_empty());
        assert_eq!(run(&rules, "/l10n/a.ftl", "no"), vec!["ID02"]);
        assert!(run(&rules, "/l10n/legacy/old.ftl", "no").is_empty());
        assert!(run(&rules, "/l10n/a.ftl", "yes").is_empty());
    }

    #[test]
    fn exclusions_are_per_rule() {
        let rules = RuleSet::new()
            .with_rule(RuleId::Id01)
            .with_rule(RuleId::Id02)
            .with_min_length(5)
            .with_exclusions(
                RuleId::Id01,
                Exclusions {
                    files: Vec::new(),
                    messages: vec!["OK".to_string()],
                },
            );

        assert_eq!(run(&rules, "/l10n/a.ftl", "OK"), vec!["ID02"]);
    }

    #[test]
    fn disabled_rules_are_silent() {
        assert!(run(&RuleSet::new(), "/l10n/a.ftl", "Bad_Name").is_empty());
    }
}
