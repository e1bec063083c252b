use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parse::{display, line};

/// Task checkbox status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    Done,
    Cancelled,
    Scheduled,
}

impl Status {
    /// Parse a checkbox character into a status. Only the done marker is
    /// case-insensitive.
    pub fn from_checkbox_char(c: char) -> Option<Status> {
        match c {
            ' ' => Some(Status::Open),
            'x' | 'X' => Some(Status::Done),
            '-' => Some(Status::Cancelled),
            '>' => Some(Status::Scheduled),
            _ => None,
        }
    }

    /// Parse a status name as typed on the command line
    pub fn from_name(name: &str) -> Option<Status> {
        match name.trim().to_ascii_lowercase().as_str() {
            "open" | "todo" => Some(Status::Open),
            "done" | "x" => Some(Status::Done),
            "cancelled" | "canceled" => Some(Status::Cancelled),
            "scheduled" => Some(Status::Scheduled),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Done => "done",
            Status::Cancelled => "cancelled",
            Status::Scheduled => "scheduled",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What sits between the brackets of a task line's checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkbox {
    Known(Status),
    /// Task-shaped line with a character outside the status table, e.g. `[?]`
    Unrecognized(char),
}

impl Checkbox {
    pub fn from_char(c: char) -> Checkbox {
        match Status::from_checkbox_char(c) {
            Some(status) => Checkbox::Known(status),
            None => Checkbox::Unrecognized(c),
        }
    }

    pub fn status(self) -> Option<Status> {
        match self {
            Checkbox::Known(status) => Some(status),
            Checkbox::Unrecognized(_) => None,
        }
    }
}

/// A task line located in a note. Snapshot of the file at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Note the line was read from
    pub file: PathBuf,
    /// 1-based line number within `file`
    pub line_number: usize,
    /// The source line without its line terminator
    pub raw: String,
}

impl Task {
    pub fn new(file: impl Into<PathBuf>, line_number: usize, raw: impl Into<String>) -> Self {
        Task {
            file: file.into(),
            line_number,
            raw: raw.into(),
        }
    }

    /// Identity used for deduplication
    pub fn key(&self) -> (&Path, usize) {
        (self.file.as_path(), self.line_number)
    }

    pub fn checkbox(&self) -> Option<Checkbox> {
        line::checkbox_of(&self.raw)
    }

    pub fn status(&self) -> Option<Status> {
        line::status_of(&self.raw)
    }

    pub fn is_priority(&self) -> bool {
        line::is_priority(&self.raw)
    }

    /// The line starting at its checkbox, e.g. `[ ] buy milk`
    pub fn display_text(&self) -> String {
        display::display_text(&self.raw)
    }

    /// File stem of the containing note
    pub fn note_name(&self) -> Option<&str> {
        self.file.file_stem().and_then(|s| s.to_str())
    }
}
