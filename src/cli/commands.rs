use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ot", about = concat!("[ ] ot v", env!("CARGO_PKG_VERSION"), " - tasks from your notes vault"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Colorize checkboxes (also enabled by OT_COLOR)
    #[arg(short = 'c', long, global = true)]
    pub color: bool,

    /// Vault directory (default: OT_VAULT_PATH)
    #[arg(long, global = true)]
    pub vault: Option<String>,

    /// Treat this day as today (yyyy-mm-dd)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// Keep only these statuses: open, done, cancelled, scheduled (comma-separated, repeatable)
    #[arg(long, global = true, value_name = "LIST")]
    pub status: Vec<String>,
    /// Keep only priority tasks (`- [ ] ! ...`)
    #[arg(long, global = true)]
    pub priority: bool,
    /// Drop tasks in calendar notes or with year/date references
    #[arg(long, global = true)]
    pub unscheduled: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in the inbox note or folder
    Inbox(InboxArgs),
    /// Tasks in today's daily note and tasks linking to it
    Today,
    /// Tasks in yesterday's daily note and tasks linking to it
    Yesterday,
    /// Tasks in tomorrow's daily note and tasks linking to it
    Tomorrow,
    /// Tasks for the daily note OFFSET days from today
    Day(DayArgs),
    /// Every task in the vault, or under the given paths/globs
    All(AllArgs),
    /// Tasks in past daily notes or referencing a past date (default: open only)
    Overdue,
    /// Tasks in the note(s) with this exact name
    Note(NoteArgs),
    /// Tasks in other notes that link to this note
    Backlinks(BacklinksArgs),
    /// Append a task to a note (default: OT_DEFAULT_NOTE)
    Add(AddArgs),
}

#[derive(Args)]
pub struct InboxArgs {
    /// Inbox folder or file (default: OT_INBOX_PATH, or OT_VAULT_PATH/OT_INBOX_NOTE)
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Args)]
pub struct DayArgs {
    /// Signed number of days from today, e.g. -2
    #[arg(allow_hyphen_values = true)]
    pub offset: i64,
}

#[derive(Args)]
pub struct AllArgs {
    /// Notes, folders or globs, relative to the vault root
    pub paths: Vec<String>,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Note name (file name without .md)
    pub name: String,
}

#[derive(Args)]
pub struct BacklinksArgs {
    /// Note name (file name without .md)
    pub name: String,
    /// Also list tasks inside the note itself that link to it
    #[arg(long)]
    pub include_self: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text; words are joined with spaces
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub text: Vec<String>,
    /// Note to append to
    #[arg(long, short = 'n')]
    pub note: Option<String>,
}
