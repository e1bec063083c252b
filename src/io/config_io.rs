use std::path::{Path, PathBuf};

use crate::model::config::VaultConfig;

pub const VAULT_PATH_VAR: &str = "OT_VAULT_PATH";
pub const CALENDAR_DIR_VAR: &str = "OT_CALENDAR_DIR";
pub const DEFAULT_NOTE_VAR: &str = "OT_DEFAULT_NOTE";
pub const INBOX_NOTE_VAR: &str = "OT_INBOX_NOTE";
pub const INBOX_PATH_VAR: &str = "OT_INBOX_PATH";
pub const COLOR_VAR: &str = "OT_COLOR";

/// Error type for configuration problems
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OT_VAULT_PATH is not set (export it or add it to .env)")]
    MissingVault,
    #[error("could not load {path}: {source}")]
    Dotenv {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

/// Load `KEY=VALUE` pairs from `.env` in `dir` into the process environment.
/// Variables that are already set win. A missing file is not an error.
pub fn load_dotenv(dir: &Path) -> Result<(), ConfigError> {
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }
    dotenvy::from_path(&path).map_err(|e| ConfigError::Dotenv {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "loaded .env");
    Ok(())
}

/// Build the config from the process environment
pub fn config_from_env() -> VaultConfig {
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Build the config from any key lookup. Blank values count as unset.
pub fn config_from_lookup<F>(lookup: F) -> VaultConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let defaults = VaultConfig::default();
    VaultConfig {
        vault_root: get(VAULT_PATH_VAR).map(|v| expand_path(&v)),
        calendar_dir: get(CALENDAR_DIR_VAR),
        default_note: get(DEFAULT_NOTE_VAR).unwrap_or(defaults.default_note),
        inbox_note: get(INBOX_NOTE_VAR).unwrap_or(defaults.inbox_note),
        inbox_path: get(INBOX_PATH_VAR).map(|v| expand_path(&v)),
        color: get(COLOR_VAR).is_some_and(|v| parse_flag(COLOR_VAR, &v)),
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

fn parse_flag(key: &str, value: &str) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value, "unrecognized boolean, treating as off");
            false
        }
    }
}

/// The vault root, or the error every vault command reports without one
pub fn require_vault(config: &VaultConfig) -> Result<&Path, ConfigError> {
    config.vault_root().ok_or(ConfigError::MissingVault)
}
