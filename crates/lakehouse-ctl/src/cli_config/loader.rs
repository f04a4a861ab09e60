//! Config file discovery and loading for `.lakehouse-ctl.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.lakehouse-ctl.toml` (project-local)
//! 2. `~/.config/lakehouse-ctl.toml` (user-global)

use std::path::{Path, PathBuf};

use super::CliConfig;

const CONFIG_FILENAME: &str = ".lakehouse-ctl.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "lakehouse-ctl.toml";

/// Load config from the first discovered location, or return defaults.
pub(crate) fn load_cli_config() -> CliConfig {
    match find_config_file() {
        Some(path) => load_from(&path),
        None => CliConfig::default(),
    }
}

/// Read and parse `path`; unreadable or malformed files fall back to defaults.
pub(crate) fn load_from(path: &Path) -> CliConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(?path, error = %e, "Failed to read config, using defaults");
            return CliConfig::default();
        }
    };

    match toml::from_str(&contents) {
        Ok(config) => {
            tracing::debug!(?path, "Loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(?path, error = %e, "Failed to parse config, using defaults");
            CliConfig::default()
        }
    }
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    let global = home_dir()?
        .join(GLOBAL_CONFIG_DIR)
        .join(GLOBAL_CONFIG_FILENAME);
    global.is_file().then_some(global)
}

/// Resolve a leading `~/` against `$HOME`.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
