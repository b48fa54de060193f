//! Typography checks on the visible text of a pattern (TE01-TE05).
//!
//! Each [`TextElement`] is first reduced to its runs of visible text with
//! [`text_runs`], and character references such as `&quot;` or `&#39;` in
//! each run are decoded. Every enabled check then reports at most once per
//! run, at the span of the whole element.

use fluent_lint_core::syntax::TextElement;
use fluent_lint_core::{FileContext, RuleId, RuleSet, Violation};
use html_escape::decode_html_entities;
use regex::Regex;

use crate::markup::text_runs;

const STRAIGHT_APOSTROPHE: &str =
    "Strings with apostrophes should use foo\u{2019}s instead of foo's.";
const WRONG_CURLY_APOSTROPHE: &str =
    "Strings with apostrophes should use foo\u{2019}s instead of foo\u{2018}s.";
const STRAIGHT_SINGLE_QUOTES: &str =
    "Single-quoted strings should use Unicode \u{2018}foo\u{2019} instead of 'foo'.";
const STRAIGHT_DOUBLE_QUOTES: &str =
    "Double-quoted strings should use Unicode \u{201c}foo\u{201d} instead of \"foo\".";
const THREE_DOT_ELLIPSIS: &str =
    "Strings with an ellipsis should use the Unicode \u{2026} character instead of three periods";

/// Stands in for a collapsed `'...'` span; not a word character.
const QUOTED_PLACEHOLDER: &str = "\u{1}";

/// Compiled patterns for the text checks.
#[derive(Debug, Clone)]
pub(crate) struct TextChecks {
    apostrophe: Regex,
    wrong_apostrophe: Regex,
    single_quoted: Regex,
    double_quoted: Regex,
    ellipsis: Regex,
}

impl TextChecks {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            apostrophe: Regex::new(r"\w'\w")?,
            wrong_apostrophe: Regex::new(r"\w\x{2018}\w")?,
            single_quoted: Regex::new(r"'(.+)'")?,
            double_quoted: Regex::new(r#"".+""#)?,
            ellipsis: Regex::new(r"\.\.\.")?,
        })
    }

    /// Runs every enabled check on `element`.
    pub(crate) fn check(
        &self,
        rules: &RuleSet,
        ctx: &FileContext,
        element: &TextElement,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        for run in text_runs(&element.value) {
            let run = decode_html_entities(run);
            for (rule, message) in self.failures(&run) {
                if rules.is_enabled(rule) {
                    violations.push(Violation::new(rule, ctx.location(element.span), message));
                }
            }
        }

        violations
    }

    /// Returns the checks `run` fails, in rule order.
    fn failures(&self, run: &str) -> Vec<(RuleId, &'static str)> {
        let mut failures = Vec::new();

        // Quoted spans are collapsed first so their delimiters are not
        // taken for apostrophes.
        let collapsed = self.single_quoted.replace_all(run, QUOTED_PLACEHOLDER);
        if self.apostrophe.is_match(&collapsed) {
            failures.push((RuleId::Te01, STRAIGHT_APOSTROPHE));
        }
        if self.wrong_apostrophe.is_match(run) {
            failures.push((RuleId::Te02, WRONG_CURLY_APOSTROPHE));
        }
        if self.single_quoted.is_match(run) {
            failures.push((RuleId::Te03, STRAIGHT_SINGLE_QUOTES));
        }
        if self.double_quoted.is_match(run) {
            failures.push((RuleId::Te04, STRAIGHT_DOUBLE_QUOTES));
        }
        if self.ellipsis.is_match(run) {
            failures.push((RuleId::Te05, THREE_DOT_ELLIPSIS));
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(text: &str) -> Vec<&'static str> {
        TextChecks::new()
            .unwrap()
            .failures(text)
            .into_iter()
            .map(|(rule, _)| rule.code())
            .collect()
    }

    #[test]
    fn clean_text_passes() {
        assert!(codes("Loading\u{2026}").is_empty());
        assert!(codes("Mozilla\u{2019}s \u{201c}Firefox\u{201d}").is_empty());
        assert!(codes("Plain text.").is_empty());
    }

    #[test]
    fn ellipsis() {
        assert_eq!(codes("Loading..."), vec!["TE05"]);
        assert!(codes("Wait..").is_empty());
    }

    #[test]
    fn straight_apostrophe() {
        assert_eq!(codes("Don't stop"), vec!["TE01"]);
        assert!(codes("the users' files").is_empty());
    }

    #[test]
    fn wrong_curly_apostrophe() {
        assert_eq!(codes("Don\u{2018}t stop"), vec!["TE02"]);
        assert!(codes("\u{2018}quoted\u{2019}").is_empty());
    }

    #[test]
    fn single_quotes_are_not_apostrophes() {
        assert_eq!(codes("Press 'OK' to continue"), vec!["TE03"]);
    }

    #[test]
    fn collapsed_quotes_hide_inner_apostrophes() {
        assert_eq!(codes("Click 'Don't ask' button"), vec!["TE03"]);
    }

    #[test]
    fn double_quotes() {
        assert_eq!(codes("Open \"Settings\""), vec!["TE04"]);
        assert!(codes("a single \" mark").is_empty());
    }

    #[test]
    fn character_references_are_decoded() {
        let checks = TextChecks::new().unwrap();
        let rules = RuleSet::all_enabled();
        let positions = fluent_lint_core::PositionIndex::default();
        let ctx = FileContext::new(
            std::path::Path::new("/l10n/a.ftl"),
            std::path::Path::new("/l10n"),
            "",
            &positions,
        );
        let codes = |value: &str| -> Vec<String> {
            let element = TextElement {
                value: value.to_string(),
                span: fluent_lint_core::syntax::Span::new(0, 0),
            };
            checks
                .check(&rules, &ctx, &element)
                .into_iter()
                .map(|v| v.code)
                .collect()
        };

        assert_eq!(codes("Text with &quot;entity&quot;"), vec!["TE04"]);
        assert_eq!(codes("it&#39;s here"), vec!["TE01"]);
        assert_eq!(codes("Wait&#x2026;"), Vec::<String>::new());
        assert_eq!(codes("fish &amp; chips"), Vec::<String>::new());
    }

    #[test]
    fn several_failures_in_one_run() {
        assert_eq!(
            codes("Don't wait... for \"them\""),
            vec!["TE01", "TE04", "TE05"]
        );
    }
}
