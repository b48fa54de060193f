//! Check command implementation.

use anyhow::{Context, Result};
use fluent_lint_core::{Analyzer, Config, RuleId};
use fluent_lint_rules::FluentLinter;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = match source.path() {
        None => Config::default(),
        Some(p) => {
            tracing::info!("Using config: {}", p.display());
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let mut rules = config.rule_set().context("Invalid configuration")?;
    if let Some(filter) = rules_filter {
        rules = rules.restrict_to(&parse_filter(filter));
    }
    if rules.enabled_rules().next().is_none() {
        tracing::warn!("No rules are enabled; nothing will be reported");
    }

    let linter = FluentLinter::new(rules).context("Failed to compile text checks")?;
    let analyzer = Analyzer::builder()
        .root(path)
        .rule(linter)
        .excludes(exclude)
        .build()
        .context("Failed to build analyzer")?;

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    if result.has_problems() {
        std::process::exit(1);
    }

    Ok(())
}

/// Parses a comma-separated list of rule codes or names, skipping unknown ones.
fn parse_filter(filter: &str) -> Vec<RuleId> {
    filter
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .filter_map(|name| match name.parse::<RuleId>() {
            Ok(rule) => Some(rule),
            Err(error) => {
                tracing::warn!("{error}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_codes_and_names() {
        assert_eq!(
            parse_filter("ID01, te05,duplicate-identifier"),
            vec![RuleId::Id01, RuleId::Te05, RuleId::Mi01]
        );
    }

    #[test]
    fn filter_skips_unknown_and_empty_entries() {
        assert_eq!(parse_filter("XX99,,SY01"), vec![RuleId::Sy01]);
        assert!(parse_filter("").is_empty());
    }
}
