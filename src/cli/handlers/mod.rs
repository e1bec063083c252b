use std::path::PathBuf;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::config::VaultConfig;
use crate::model::task::{Status, Task};
use crate::ops::append::{self, AppendError};
use crate::ops::filter::{self, TaskFilter, UnknownStatus};
use crate::ops::query::{self, QueryError};

/// Exit code for usage errors and notes that could not be found
pub const EXIT_USAGE: i32 = 2;
/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Error type for command handlers
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Append(#[from] AppendError),
    #[error(transparent)]
    Status(#[from] UnknownStatus),
    #[error("could not render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_)
            | CliError::Status(_)
            | CliError::Query(QueryError::NoteNotFound(_))
            | CliError::Query(QueryError::InvalidGlob { .. })
            | CliError::Append(AppendError::EmptyNoteName)
            | CliError::Append(AppendError::EmptyText) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, mut config: VaultConfig) -> Result<(), CliError> {
    // Command-line flags win over the environment
    if let Some(ref vault) = cli.vault {
        config.vault_root = Some(config_io::expand_path(vault));
    }
    let today = resolve_today(cli.date.as_deref())?;
    let filter = build_filter(&cli.filter)?;
    let output = OutputOptions {
        json: cli.json,
        color: cli.color || config.color,
        strip_refs: false,
    };

    match cli.command {
        Commands::Inbox(args) => cmd_inbox(args, &config, &filter, output),
        Commands::Today => cmd_day(0, today, &config, &filter, output),
        Commands::Yesterday => cmd_day(-1, today, &config, &filter, output),
        Commands::Tomorrow => cmd_day(1, today, &config, &filter, output),
        Commands::Day(args) => cmd_day(args.offset, today, &config, &filter, output),
        Commands::All(args) => cmd_all(args, &config, &filter, output),
        Commands::Overdue => cmd_overdue(today, &config, filter, output),
        Commands::Note(args) => cmd_note(args, &config, &filter, output),
        Commands::Backlinks(args) => cmd_backlinks(args, &config, &filter, output),
        Commands::Add(args) => cmd_add(args, &config, cli.json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `--date` value, or the local calendar date
fn resolve_today(date: Option<&str>) -> Result<NaiveDate, CliError> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| CliError::Usage(format!("invalid --date '{}': expected yyyy-mm-dd", raw))),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn build_filter(args: &FilterArgs) -> Result<TaskFilter, CliError> {
    let statuses = if args.status.is_empty() {
        None
    } else {
        Some(filter::parse_statuses(args.status.iter().map(String::as_str))?)
    };
    Ok(TaskFilter {
        statuses,
        priority_only: args.priority,
        unscheduled: args.unscheduled,
    })
}

fn print_tasks(tasks: &[Task], output: &OutputOptions) -> Result<(), CliError> {
    if tasks.is_empty() && !output.json {
        return Ok(());
    }
    println!("{}", render_tasks(tasks, output)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_inbox(
    args: InboxArgs,
    config: &VaultConfig,
    filter: &TaskFilter,
    output: OutputOptions,
) -> Result<(), CliError> {
    let mut config = config.clone();
    if let Some(path) = args.path {
        config.inbox_path = Some(config_io::expand_path(&path));
    }
    let tasks = query::inbox_tasks(&config)?;
    print_tasks(&filter.apply(tasks), &output)
}

fn cmd_day(
    offset: i64,
    today: NaiveDate,
    config: &VaultConfig,
    filter: &TaskFilter,
    output: OutputOptions,
) -> Result<(), CliError> {
    let tasks = query::day_tasks(config, today, offset)?;
    let output = OutputOptions {
        strip_refs: true,
        ..output
    };
    print_tasks(&filter.apply(tasks), &output)
}

fn cmd_all(
    args: AllArgs,
    config: &VaultConfig,
    filter: &TaskFilter,
    output: OutputOptions,
) -> Result<(), CliError> {
    let tasks = query::all_tasks(config, &args.paths)?;
    print_tasks(&filter.apply(tasks), &output)
}

fn cmd_overdue(
    today: NaiveDate,
    config: &VaultConfig,
    filter: TaskFilter,
    output: OutputOptions,
) -> Result<(), CliError> {
    let tasks = query::overdue_tasks(config, today)?;
    let filter = filter.with_default_statuses(&[Status::Open]);
    let output = OutputOptions {
        strip_refs: true,
        ..output
    };
    print_tasks(&filter.apply(tasks), &output)
}

fn cmd_note(
    args: NoteArgs,
    config: &VaultConfig,
    filter: &TaskFilter,
    output: OutputOptions,
) -> Result<(), CliError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::Usage("note name must not be empty".to_string()));
    }
    let tasks = query::note_tasks(config, name)?;
    print_tasks(&filter.apply(tasks), &output)
}

fn cmd_backlinks(
    args: BacklinksArgs,
    config: &VaultConfig,
    filter: &TaskFilter,
    output: OutputOptions,
) -> Result<(), CliError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(CliError::Usage("note name must not be empty".to_string()));
    }
    let tasks = query::backlinks_for_name(config, name, args.include_self)?;
    let output = OutputOptions {
        strip_refs: true,
        ..output
    };
    print_tasks(&filter.apply(tasks), &output)
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, config: &VaultConfig, json: bool) -> Result<(), CliError> {
    let text = args.text.join(" ");
    let note = args.note.unwrap_or_else(|| config.default_note.clone());
    if note.trim().is_empty() {
        return Err(AppendError::EmptyNoteName.into());
    }
    if text.trim().is_empty() {
        return Err(AppendError::EmptyText.into());
    }

    let vault_root = config_io::require_vault(config)?;
    let path: PathBuf = append::append_task(vault_root, &note, &text)?;

    if json {
        let added = AddedJson {
            file: path.display().to_string(),
            line: append::normalize_task_line(&text),
        };
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_today() {
        assert_eq!(
            resolve_today(Some("2026-01-16")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
        );
        let err = resolve_today(Some("16/01/2026")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }

    #[test]
    fn test_build_filter() {
        let args = FilterArgs {
            status: vec!["done,cancelled".to_string()],
            priority: true,
            unscheduled: false,
        };
        let filter = build_filter(&args).unwrap();
        assert_eq!(
            filter.statuses,
            Some([Status::Done, Status::Cancelled].into_iter().collect())
        );
        assert!(filter.priority_only);

        let bad = FilterArgs {
            status: vec!["blocked".to_string()],
            ..FilterArgs::default()
        };
        assert_eq!(build_filter(&bad).unwrap_err().exit_code(), EXIT_USAGE);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Query(QueryError::NoteNotFound("x".into())).exit_code(), EXIT_USAGE);
        assert_eq!(CliError::Append(AppendError::EmptyText).exit_code(), EXIT_USAGE);
        assert_eq!(CliError::Config(ConfigError::MissingVault).exit_code(), EXIT_FAILURE);
    }
}
