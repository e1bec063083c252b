//! Task listings that combine the walker, the extractor and the reference
//! grammar. Every query returns tasks unique by `(file, line_number)`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, TimeDelta};
use globset::{Glob, GlobMatcher};

use crate::io::config_io::{self, ConfigError};
use crate::io::vault_io::{self, VaultError};
use crate::model::config::VaultConfig;
use crate::model::task::Task;
use crate::ops::extract::{extract_tasks, extract_tasks_tree};
use crate::parse::reference::{date_references, has_reference, parse_daily_note_date};

/// Error type for aggregation queries
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error("note not found: {0}")]
    NoteNotFound(String),
    #[error("invalid glob '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },
    #[error("date offset {0} days is out of range")]
    DateOutOfRange(i64),
}

/// Drop later tasks that repeat an earlier `(file, line_number)`.
pub fn dedup_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen: HashSet<(PathBuf, usize)> = HashSet::new();
    tasks
        .into_iter()
        .filter(|t| seen.insert((t.file.clone(), t.line_number)))
        .collect()
}

// ---------------------------------------------------------------------------
// Daily notes
// ---------------------------------------------------------------------------

/// `vault/<calendar_dir>/yyyy-mm-dd.md`
pub fn daily_note_path(vault_root: &Path, calendar_dir: Option<&str>, date: NaiveDate) -> PathBuf {
    let dir = match calendar_dir {
        Some(d) => vault_root.join(d),
        None => vault_root.to_path_buf(),
    };
    dir.join(format!("{}.{}", date.format("%Y-%m-%d"), vault_io::NOTE_EXTENSION))
}

/// Tasks written in the daily note for `date`. A missing note has none.
pub fn tasks_for_date(config: &VaultConfig, date: NaiveDate) -> Result<Vec<Task>, QueryError> {
    let vault_root = config_io::require_vault(config)?;
    let path = daily_note_path(vault_root, config.calendar_dir(), date);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no daily note");
        return Ok(Vec::new());
    }
    Ok(extract_tasks(&path)?)
}

// ---------------------------------------------------------------------------
// Backlinks
// ---------------------------------------------------------------------------

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Tasks anywhere in the vault that contain `[[<stem of note_path>]]`.
///
/// With `include_self` false, tasks of `note_path` itself are left out. The
/// note does not need to exist.
pub fn backlinked_tasks(
    vault_root: &Path,
    note_path: &Path,
    include_self: bool,
) -> Result<Vec<Task>, VaultError> {
    let Some(name) = note_path.file_stem().and_then(|s| s.to_str()) else {
        return Ok(Vec::new());
    };
    let target = canonical(note_path);

    let mut tasks = Vec::new();
    for file in vault_io::list_note_files(vault_root)? {
        if !include_self && canonical(&file) == target {
            continue;
        }
        tasks.extend(
            extract_tasks(&file)?
                .into_iter()
                .filter(|t| has_reference(&t.raw, name)),
        );
    }
    Ok(dedup_tasks(tasks))
}

/// Backlinks of the note called `name`, whether or not it exists yet
pub fn backlinks_for_name(
    config: &VaultConfig,
    name: &str,
    include_self: bool,
) -> Result<Vec<Task>, QueryError> {
    let vault_root = config_io::require_vault(config)?;
    let note_path = vault_io::resolve_note_path(vault_root, name)?;
    Ok(backlinked_tasks(vault_root, &note_path, include_self)?)
}

// ---------------------------------------------------------------------------
// Day / all / overdue / note / inbox
// ---------------------------------------------------------------------------

/// Date `offset` days away from `today`
pub fn offset_date(today: NaiveDate, offset: i64) -> Result<NaiveDate, QueryError> {
    TimeDelta::try_days(offset)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or(QueryError::DateOutOfRange(offset))
}

/// Tasks of the daily note `offset` days from `today`, followed by tasks in
/// other notes that link to it.
pub fn day_tasks(
    config: &VaultConfig,
    today: NaiveDate,
    offset: i64,
) -> Result<Vec<Task>, QueryError> {
    let vault_root = config_io::require_vault(config)?;
    let date = offset_date(today, offset)?;
    let note_path = daily_note_path(vault_root, config.calendar_dir(), date);

    let mut tasks = tasks_for_date(config, date)?;
    tasks.extend(backlinked_tasks(vault_root, &note_path, false)?);

    tracing::debug!(%date, count = tasks.len(), "day query");
    Ok(dedup_tasks(tasks))
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

fn glob_matcher(pattern: &str) -> Result<GlobMatcher, QueryError> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|e| QueryError::InvalidGlob {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Vault-relative path with `/` separators, as globs are written
fn relative_slash_path(vault_root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(vault_root).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Every task in the vault, or in the union of `overrides`.
///
/// An override is a note, a folder, or a glob over vault-relative paths.
/// Relative overrides are taken relative to the vault root.
pub fn all_tasks(config: &VaultConfig, overrides: &[String]) -> Result<Vec<Task>, QueryError> {
    let vault_root = config_io::require_vault(config)?;
    if overrides.is_empty() {
        return Ok(dedup_tasks(extract_tasks_tree(vault_root)?));
    }

    let mut tasks = Vec::new();
    for raw in overrides {
        if is_glob(raw) {
            let matcher = glob_matcher(raw)?;
            for file in vault_io::list_note_files(vault_root)? {
                if matcher.is_match(relative_slash_path(vault_root, &file)) {
                    tasks.extend(extract_tasks(&file)?);
                }
            }
        } else {
            let path = config_io::expand_path(raw);
            let path = if path.is_absolute() {
                path
            } else {
                vault_root.join(path)
            };
            tasks.extend(extract_tasks_tree(&path)?);
        }
    }
    Ok(dedup_tasks(tasks))
}

/// Tasks tied to a day before `today`: every task in a past daily note,
/// and every task that references at least one past date.
pub fn overdue_tasks(config: &VaultConfig, today: NaiveDate) -> Result<Vec<Task>, QueryError> {
    let vault_root = config_io::require_vault(config)?;

    let mut tasks = Vec::new();
    for file in vault_io::list_note_files(vault_root)? {
        let past_daily_note = file
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(parse_daily_note_date)
            .is_some_and(|date| date < today);

        tasks.extend(extract_tasks(&file)?.into_iter().filter(|t| {
            past_daily_note || date_references(&t.raw).iter().any(|d| *d < today)
        }));
    }

    tracing::debug!(%today, count = tasks.len(), "overdue query");
    Ok(dedup_tasks(tasks))
}

/// Tasks of every note whose file stem is exactly `name`
pub fn note_tasks(config: &VaultConfig, name: &str) -> Result<Vec<Task>, QueryError> {
    let vault_root = config_io::require_vault(config)?;
    let notes = vault_io::find_notes_by_name(vault_root, name)?;
    if notes.is_empty() {
        return Err(QueryError::NoteNotFound(name.to_string()));
    }

    let mut tasks = Vec::new();
    for note in &notes {
        tasks.extend(extract_tasks(note)?);
    }
    Ok(dedup_tasks(tasks))
}

/// Where the inbox lives: the explicit inbox path, else the inbox note under
/// the vault root. A bare note name gets the note extension when no such
/// folder exists.
pub fn inbox_location(config: &VaultConfig) -> Result<PathBuf, QueryError> {
    if let Some(path) = &config.inbox_path {
        return Ok(match config.vault_root() {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.clone(),
        });
    }

    let vault_root = config_io::require_vault(config)?;
    let path = vault_root.join(&config.inbox_note);
    if !vault_io::is_note_file(&path) && !path.is_dir() {
        let mut with_ext = path.into_os_string();
        with_ext.push(".");
        with_ext.push(vault_io::NOTE_EXTENSION);
        return Ok(PathBuf::from(with_ext));
    }
    Ok(path)
}

/// Tasks in the inbox note or folder
pub fn inbox_tasks(config: &VaultConfig) -> Result<Vec<Task>, QueryError> {
    let location = inbox_location(config)?;
    Ok(dedup_tasks(extract_tasks_tree(&location)?))
}
