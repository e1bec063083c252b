use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Extension of note files, compared case-insensitively
pub const NOTE_EXTENSION: &str = "md";

/// Error type for vault I/O operations
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Whether `path` has the note extension
pub fn is_note_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(NOTE_EXTENSION))
}

/// Enumerate note files under `root`, sorted by full path.
///
/// A note file as root yields itself. A missing root yields nothing.
/// Symlinked notes and folders are followed. Entries that cannot be read
/// while walking, including link loops, abort the walk.
pub fn list_note_files(root: &Path) -> Result<Vec<PathBuf>, VaultError> {
    if root.is_file() {
        return Ok(if is_note_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "note root does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| VaultError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;
        if entry.file_type().is_file() && is_note_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    tracing::debug!(root = %root.display(), count = files.len(), "listed note files");
    Ok(files)
}

/// Read a note as UTF-8, replacing undecodable bytes instead of failing.
pub fn read_note(path: &Path) -> Result<String, VaultError> {
    let bytes = fs::read(path).map_err(|e| VaultError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), "note is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Replace a note's content, creating missing parent directories.
///
/// Writes to a temp file beside the note and renames it into place so an
/// interrupted write never leaves a truncated note. A symlinked note is
/// written through to its target, and an existing note keeps its
/// permissions.
pub fn write_note(path: &Path, content: &str) -> Result<(), VaultError> {
    let write_err = |source: std::io::Error| VaultError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Notes anywhere in the vault whose file stem is exactly `name`, sorted by
/// path.
pub fn find_notes_by_name(vault_root: &Path, name: &str) -> Result<Vec<PathBuf>, VaultError> {
    if name.is_empty() {
        return Ok(Vec::new());
    }
    let matches = list_note_files(vault_root)?
        .into_iter()
        .filter(|p| p.file_stem().and_then(|s| s.to_str()) == Some(name))
        .collect();
    Ok(matches)
}

/// Path of the note called `name`: the first existing match, or a new
/// `<name>.md` directly under the vault root.
pub fn resolve_note_path(vault_root: &Path, name: &str) -> Result<PathBuf, VaultError> {
    let existing = find_notes_by_name(vault_root, name)?;
    Ok(existing
        .into_iter()
        .next()
        .unwrap_or_else(|| vault_root.join(format!("{}.{}", name, NOTE_EXTENSION))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_list_note_files_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "b.md", "");
        write(root, "a/z.md", "");
        write(root, "a/Upper.MD", "");
        write(root, "notes.txt", "");
        write(root, "c/d/e.md", "");

        let files = list_note_files(root).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["a/Upper.MD", "a/z.md", "b.md", "c/d/e.md"]);
    }

    #[test]
    fn test_list_note_files_single_file_and_missing() {
        let tmp = TempDir::new().unwrap();
        let note = write(tmp.path(), "one.md", "- [ ] a\n");
        let other = write(tmp.path(), "one.txt", "- [ ] a\n");

        assert_eq!(list_note_files(&note).unwrap(), vec![note.clone()]);
        assert!(list_note_files(&other).unwrap().is_empty());
        assert!(list_note_files(&tmp.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_read_note_forgiving() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.md");
        fs::write(&path, b"- [ ] caf\xe9\n- [ ] after\n").unwrap();

        let text = read_note(&path).unwrap();
        assert_eq!(text, "- [ ] caf\u{FFFD}\n- [ ] after\n");
    }

    #[test]
    fn test_read_note_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_note(&tmp.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, VaultError::Read { .. }));
    }

    #[test]
    fn test_write_note_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep/dir/note.md");
        write_note(&path, "- [ ] x\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [ ] x\n");

        write_note(&path, "replaced\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "replaced\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_list_note_files_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        write(&outside, "Shared.md", "- [ ] shared\n");
        let vault = tmp.path().join("vault");
        write(&vault, "Local.md", "");
        symlink(outside.join("Shared.md"), vault.join("Shared.md")).unwrap();
        symlink(&outside, vault.join("Linked")).unwrap();

        let files = list_note_files(&vault).unwrap();
        assert_eq!(
            files,
            vec![vault.join("Linked/Shared.md"), vault.join("Local.md"), vault.join("Shared.md")]
        );
        assert_eq!(
            find_notes_by_name(&vault, "Shared").unwrap(),
            vec![vault.join("Linked/Shared.md"), vault.join("Shared.md")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_list_note_files_link_loop_is_error() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a/note.md", "");
        symlink(tmp.path().join("a"), tmp.path().join("a/again")).unwrap();

        let err = list_note_files(tmp.path()).unwrap_err();
        assert!(matches!(err, VaultError::Walk { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_note_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "note.md", "- [ ] a\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_note(&path, "- [ ] a\n- [ ] b\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_note_through_symlink() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let real = write(tmp.path(), "outside/real.md", "- [ ] a\n");
        let link = tmp.path().join("vault/link.md");
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        symlink(&real, &link).unwrap();

        write_note(&link, "- [ ] a\n- [ ] b\n").unwrap();
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "- [ ] a\n- [ ] b\n");
    }

    #[test]
    fn test_find_notes_by_name_exact() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let a = write(root, "Project X.md", "");
        let b = write(root, "archive/Project X.md", "");
        write(root, "Project X2.md", "");

        assert_eq!(find_notes_by_name(root, "Project X").unwrap(), vec![a, b]);
        assert!(find_notes_by_name(root, "").unwrap().is_empty());
        assert!(find_notes_by_name(&root.join("missing"), "Project X").unwrap().is_empty());
    }

    #[test]
    fn test_resolve_note_path() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let existing = write(root, "sub/Work.md", "");

        assert_eq!(resolve_note_path(root, "Work").unwrap(), existing);
        assert_eq!(resolve_note_path(root, "Fresh").unwrap(), root.join("Fresh.md"));
    }
}
