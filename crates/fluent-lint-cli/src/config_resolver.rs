//! Configuration file resolution.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path, must exist)
//! 2. `config.yml` next to the executable, or in `$FLUENT_LINT_CONFIG_DIR`
//! 3. No config found → empty configuration, every rule off

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the bundled config directory.
    Bundled(PathBuf),
    /// No config found; nothing will be reported.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Bundled(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Config file name within the bundled config directory.
const BUNDLED_CONFIG_NAME: &str = "config.yml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(explicit, bundled_config_dir())
}

/// Testable core: accepts `bundled_dir` as parameter to avoid env var races.
fn resolve_inner(explicit: Option<&Path>, bundled_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(dir) = bundled_dir {
        let candidate = dir.join(BUNDLED_CONFIG_NAME);
        if candidate.is_file() {
            tracing::debug!("Found bundled config: {}", candidate.display());
            return ConfigSource::Bundled(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the directory searched for a bundled `config.yml`.
///
/// Resolution: `$FLUENT_LINT_CONFIG_DIR` > directory of the executable
#[must_use]
pub fn bundled_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("FLUENT_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
