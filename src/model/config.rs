use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Vault settings, built once at startup and passed into every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Root of the vault. Every vault command requires it.
    #[serde(default)]
    pub vault_root: Option<PathBuf>,
    /// Subdirectory holding daily notes. Unset or empty means the vault root.
    #[serde(default)]
    pub calendar_dir: Option<String>,
    /// Note that `add` appends to when no note is given
    #[serde(default = "default_note_name")]
    pub default_note: String,
    /// Inbox note name, relative to the vault root
    #[serde(default = "default_note_name")]
    pub inbox_note: String,
    /// Explicit inbox file or folder, takes precedence over `inbox_note`
    #[serde(default)]
    pub inbox_path: Option<PathBuf>,
    /// Colorize checkbox tokens in human output
    #[serde(default)]
    pub color: bool,
}

fn default_note_name() -> String {
    "Inbox".to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        VaultConfig {
            vault_root: None,
            calendar_dir: None,
            default_note: default_note_name(),
            inbox_note: default_note_name(),
            inbox_path: None,
            color: false,
        }
    }
}

impl VaultConfig {
    /// Config rooted at `vault_root` with every other setting at its default
    pub fn with_vault(vault_root: impl Into<PathBuf>) -> Self {
        VaultConfig {
            vault_root: Some(vault_root.into()),
            ..VaultConfig::default()
        }
    }

    pub fn vault_root(&self) -> Option<&Path> {
        self.vault_root.as_deref()
    }

    /// Calendar subdirectory, with an empty value treated as unset
    pub fn calendar_dir(&self) -> Option<&str> {
        self.calendar_dir
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VaultConfig::default();
        assert_eq!(config.vault_root(), None);
        assert_eq!(config.default_note, "Inbox");
        assert_eq!(config.inbox_note, "Inbox");
        assert!(!config.color);
    }

    #[test]
    fn test_blank_calendar_dir_is_unset() {
        let mut config = VaultConfig::with_vault("/vault");
        config.calendar_dir = Some("  ".to_string());
        assert_eq!(config.calendar_dir(), None);
        config.calendar_dir = Some("Calendar".to_string());
        assert_eq!(config.calendar_dir(), Some("Calendar"));
    }
}
