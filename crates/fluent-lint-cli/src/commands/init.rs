//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "config.yml";

const DEFAULT_CONFIG: &str = r"# fluent-lint configuration
#
# Every rule is off unless it is listed here. Syntax rules (SY*) describe
# Fluent features the project does not use: `disabled: true` reports them.
# Run `fluent-lint list-rules` for the full catalogue.

# Comments
RC01:
  enabled: true
RC02:
  enabled: true
RC03:
  enabled: true
GC01:
  enabled: true
GC02:
  enabled: true
GC03:
  enabled: true
GC04:
  enabled: true

# Identifiers
MI01:
  enabled: true
ID01:
  enabled: true
  exclusions:
    files: []
    messages: []
ID02:
  enabled: true
  min_length: 9
  exclusions:
    files: []
    messages: []

# Syntax
SY01:
  disabled: false
SY02:
  disabled: false
SY03:
  disabled: false
SY04:
  disabled: false
SY05:
  disabled: false

# Typography
TE01:
  enabled: true
TE02:
  enabled: true
TE03:
  enabled: true
TE04:
  enabled: true
TE05:
  enabled: true
";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: fluent-lint check --config {CONFIG_NAME} <l10n-dir>");

    Ok(())
}

/// Writes the default configuration into `dir`.
fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_lint_core::{Config, RuleId};
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let rules = Config::parse_yaml(DEFAULT_CONFIG)
            .unwrap()
            .rule_set()
            .unwrap();

        assert_eq!(rules.id_min_length(), 9);
        assert!(rules.is_enabled(RuleId::Rc01));
        assert!(rules.is_enabled(RuleId::Te05));
        assert!(!rules.is_enabled(RuleId::Sy01));
        assert_eq!(rules.enabled_rules().count(), 15);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_NAME), "custom").unwrap();

        assert!(write_config(tmp.path(), false).is_err());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(CONFIG_NAME)).unwrap(),
            "custom"
        );

        write_config(tmp.path(), true).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(CONFIG_NAME)).unwrap(),
            DEFAULT_CONFIG
        );
    }
}
