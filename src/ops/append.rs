use std::path::{Path, PathBuf};

use crate::io::vault_io::{self, VaultError};
use crate::parse::line::is_task_line;

/// Prefix given to text that is not already a task line
pub const OPEN_TASK_PREFIX: &str = "- [ ]";

/// Error type for appending a task
#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    #[error("note name must not be empty")]
    EmptyNoteName,
    #[error("task text must not be empty")]
    EmptyText,
    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// Turn free text into a task line. Text that already is a task line is
/// kept as written.
pub fn normalize_task_line(text: &str) -> String {
    if is_task_line(text) {
        text.to_string()
    } else {
        format!("{} {}", OPEN_TASK_PREFIX, text.trim())
    }
}

/// Append `text` as a task line to the note called `note_name`, creating the
/// note at the vault root when it does not exist. Returns the note's path.
pub fn append_task(vault_root: &Path, note_name: &str, text: &str) -> Result<PathBuf, AppendError> {
    let note_name = note_name.trim();
    if note_name.is_empty() {
        return Err(AppendError::EmptyNoteName);
    }
    if text.trim().is_empty() {
        return Err(AppendError::EmptyText);
    }

    let path = vault_io::resolve_note_path(vault_root, note_name)?;
    let line = normalize_task_line(text);

    let mut content = if path.exists() {
        vault_io::read_note(&path)?
    } else {
        String::new()
    };
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&line);
    content.push('\n');

    vault_io::write_note(&path, &content)?;
    tracing::debug!(path = %path.display(), "appended task");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_note() {
        let tmp = TempDir::new().unwrap();
        let path = append_task(tmp.path(), "X", "hello").unwrap();
        assert_eq!(path, tmp.path().join("X.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [ ] hello\n");
    }

    #[test]
    fn test_second_append_keeps_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = append_task(tmp.path(), "X", "hello").unwrap();
        append_task(tmp.path(), "X", "- [ ] world").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [ ] hello\n- [ ] world\n");
    }

    #[test]
    fn test_append_adds_missing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Notes.md");
        fs::write(&path, "# Notes\nsome text").unwrap();

        append_task(tmp.path(), "Notes", "  call Bob  ").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Notes\nsome text\n- [ ] call Bob\n"
        );
    }

    #[test]
    fn test_append_to_existing_nested_note() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("Projects/Work.md");
        fs::create_dir_all(nested.parent().unwrap()).unwrap();
        fs::write(&nested, "- [x] done\n").unwrap();

        let path = append_task(tmp.path(), "Work", "* [>] later").unwrap();
        assert_eq!(path, nested);
        assert_eq!(fs::read_to_string(&nested).unwrap(), "- [x] done\n* [>] later\n");
    }

    #[test]
    fn test_append_rejects_empty_input() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(append_task(tmp.path(), "  ", "x"), Err(AppendError::EmptyNoteName)));
        assert!(matches!(append_task(tmp.path(), "X", " \t "), Err(AppendError::EmptyText)));
        assert!(fs::read_dir(tmp.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_append_creates_missing_vault_dir() {
        let tmp = TempDir::new().unwrap();
        let vault = tmp.path().join("new-vault");
        let path = append_task(&vault, "Inbox", "first").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "- [ ] first\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_append_to_symlinked_note() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("shared/Inbox.md");
        fs::create_dir_all(real.parent().unwrap()).unwrap();
        fs::write(&real, "- [ ] a\n").unwrap();
        let vault = tmp.path().join("vault");
        fs::create_dir_all(&vault).unwrap();
        symlink(&real, vault.join("Inbox.md")).unwrap();

        let path = append_task(&vault, "Inbox", "b").unwrap();
        assert_eq!(path, vault.join("Inbox.md"));
        assert!(fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "- [ ] a\n- [ ] b\n");
    }

    #[test]
    fn test_normalize_task_line() {
        assert_eq!(normalize_task_line("buy milk"), "- [ ] buy milk");
        assert_eq!(normalize_task_line("  - [x] already"), "  - [x] already");
        assert_eq!(normalize_task_line("[ ] bare checkbox"), "- [ ] [ ] bare checkbox");
    }
}
