//! The catalogue of rule codes.

use std::fmt;
use std::str::FromStr;

/// Groups of related rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCategory {
    /// Placement and spacing of `###` and `##` comments.
    Comments,
    /// Format, length and uniqueness of identifiers.
    Identifiers,
    /// Syntax features a project may not support.
    Syntax,
    /// Typography of the visible text.
    Text,
}

/// Identifies one lint rule.
///
/// Each variant corresponds to a code such as `RC01`; the code is what
/// configuration files and reports use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    /// Resource comment not at the top of the file.
    Rc01,
    /// Resource comment not followed by one blank line.
    Rc02,
    /// Resource comment not preceded by one blank line.
    Rc03,
    /// Non-empty group comment at the end of the file.
    Gc01,
    /// Group comment not followed by one blank line.
    Gc02,
    /// Group comment not preceded by one blank line.
    Gc03,
    /// Group comment not followed by any message.
    Gc04,
    /// Identifier defined twice in a file.
    Mi01,
    /// Identifier with characters outside `[a-z0-9-]`.
    Id01,
    /// Identifier shorter than the configured minimum.
    Id02,
    /// Term definitions are not supported.
    Sy01,
    /// Message references are not supported.
    Sy02,
    /// Term references are not supported.
    Sy03,
    /// Select expressions are not supported.
    Sy04,
    /// Attributes are not supported.
    Sy05,
    /// Straight apostrophe.
    Te01,
    /// Left single quotation mark used as an apostrophe.
    Te02,
    /// Straight single quotes.
    Te03,
    /// Straight double quotes.
    Te04,
    /// Three periods instead of an ellipsis.
    Te05,
}

impl RuleId {
    /// Every rule, in code order.
    pub const ALL: [RuleId; 20] = [
        Self::Rc01,
        Self::Rc02,
        Self::Rc03,
        Self::Gc01,
        Self::Gc02,
        Self::Gc03,
        Self::Gc04,
        Self::Mi01,
        Self::Id01,
        Self::Id02,
        Self::Sy01,
        Self::Sy02,
        Self::Sy03,
        Self::Sy04,
        Self::Sy05,
        Self::Te01,
        Self::Te02,
        Self::Te03,
        Self::Te04,
        Self::Te05,
    ];

    /// Returns the rule code (e.g., "RC01").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Rc01 => "RC01",
            Self::Rc02 => "RC02",
            Self::Rc03 => "RC03",
            Self::Gc01 => "GC01",
            Self::Gc02 => "GC02",
            Self::Gc03 => "GC03",
            Self::Gc04 => "GC04",
            Self::Mi01 => "MI01",
            Self::Id01 => "ID01",
            Self::Id02 => "ID02",
            Self::Sy01 => "SY01",
            Self::Sy02 => "SY02",
            Self::Sy03 => "SY03",
            Self::Sy04 => "SY04",
            Self::Sy05 => "SY05",
            Self::Te01 => "TE01",
            Self::Te02 => "TE02",
            Self::Te03 => "TE03",
            Self::Te04 => "TE04",
            Self::Te05 => "TE05",
        }
    }

    /// Returns the kebab-case rule name (e.g., "resource-comment-placement").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rc01 => "resource-comment-placement",
            Self::Rc02 => "resource-comment-blank-after",
            Self::Rc03 => "resource-comment-blank-before",
            Self::Gc01 => "group-comment-at-end",
            Self::Gc02 => "group-comment-blank-after",
            Self::Gc03 => "group-comment-blank-before",
            Self::Gc04 => "group-comment-without-message",
            Self::Mi01 => "duplicate-identifier",
            Self::Id01 => "identifier-format",
            Self::Id02 => "identifier-length",
            Self::Sy01 => "unsupported-terms",
            Self::Sy02 => "unsupported-message-references",
            Self::Sy03 => "unsupported-term-references",
            Self::Sy04 => "unsupported-variants",
            Self::Sy05 => "unsupported-attributes",
            Self::Te01 => "straight-apostrophe",
            Self::Te02 => "wrong-curly-apostrophe",
            Self::Te03 => "straight-single-quotes",
            Self::Te04 => "straight-double-quotes",
            Self::Te05 => "three-dot-ellipsis",
        }
    }

    /// Returns a brief description of what the rule checks.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Rc01 => "Resource comments (###) belong at the top of the file",
            Self::Rc02 => "Resource comments (###) are followed by one empty line",
            Self::Rc03 => "Resource comments (###) are preceded by one empty line",
            Self::Gc01 => "Only an empty group comment (##) may end the file",
            Self::Gc02 => "Group comments (##) are followed by one empty line",
            Self::Gc03 => "Group comments (##) are preceded by one empty line",
            Self::Gc04 => "Group comments (##) are followed by at least one message",
            Self::Mi01 => "Message and term identifiers are unique within a file",
            Self::Id01 => "Identifiers only contain lowercase letters, digits and -",
            Self::Id02 => "Identifiers have a minimum length",
            Self::Sy01 => "Forbids term definitions",
            Self::Sy02 => "Forbids message references",
            Self::Sy03 => "Forbids term references",
            Self::Sy04 => "Forbids select expressions with variants",
            Self::Sy05 => "Forbids attributes",
            Self::Te01 => "Apostrophes use \u{2019} instead of '",
            Self::Te02 => "Apostrophes use \u{2019} instead of \u{2018}",
            Self::Te03 => "Single quotes use \u{2018}\u{2019} instead of ''",
            Self::Te04 => "Double quotes use \u{201c}\u{201d} instead of \"\"",
            Self::Te05 => "Ellipses use \u{2026} instead of ...",
        }
    }

    /// Returns the group the rule belongs to.
    #[must_use]
    pub fn category(self) -> RuleCategory {
        match self {
            Self::Rc01
            | Self::Rc02
            | Self::Rc03
            | Self::Gc01
            | Self::Gc02
            | Self::Gc03
            | Self::Gc04 => RuleCategory::Comments,
            Self::Mi01 | Self::Id01 | Self::Id02 => RuleCategory::Identifiers,
            Self::Sy01 | Self::Sy02 | Self::Sy03 | Self::Sy04 | Self::Sy05 => RuleCategory::Syntax,
            Self::Te01 | Self::Te02 | Self::Te03 | Self::Te04 | Self::Te05 => RuleCategory::Text,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown rule code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule: {0}")]
pub struct UnknownRuleId(pub String);

impl FromStr for RuleId {
    type Err = UnknownRuleId;

    /// Accepts the code in any case, or the kebab-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|rule| rule.code().eq_ignore_ascii_case(s) || rule.name() == s)
            .ok_or_else(|| UnknownRuleId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("RC01".parse::<RuleId>(), Ok(RuleId::Rc01));
        assert_eq!("te05".parse::<RuleId>(), Ok(RuleId::Te05));
        assert_eq!(" ID02 ".parse::<RuleId>(), Ok(RuleId::Id02));
    }

    #[test]
    fn parses_names() {
        assert_eq!("duplicate-identifier".parse::<RuleId>(), Ok(RuleId::Mi01));
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            "XX99".parse::<RuleId>(),
            Err(UnknownRuleId("XX99".to_string()))
        );
    }

    #[test]
    fn codes_are_unique_and_round_trip() {
        for rule in RuleId::ALL {
            assert_eq!(rule.code().parse::<RuleId>(), Ok(rule));
            assert_eq!(rule.to_string(), rule.code());
        }
        let mut codes: Vec<&str> = RuleId::ALL.iter().map(|r| r.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), RuleId::ALL.len());
    }

    #[test]
    fn categories() {
        assert_eq!(RuleId::Gc04.category(), RuleCategory::Comments);
        assert_eq!(RuleId::Mi01.category(), RuleCategory::Identifiers);
        assert_eq!(RuleId::Sy05.category(), RuleCategory::Syntax);
        assert_eq!(RuleId::Te01.category(), RuleCategory::Text);
    }
}
