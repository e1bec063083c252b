use serde::Serialize;

use crate::model::task::{Status, Task};
use crate::parse::display::colorize_checkbox;
use crate::parse::reference::strip_reference_tokens;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub file: String,
    pub line: usize,
    pub text: String,
    pub status: Option<Status>,
    pub priority: bool,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub file: String,
    pub line: String,
}

// ---------------------------------------------------------------------------
// Rendering options
// ---------------------------------------------------------------------------

/// How a task list is rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub color: bool,
    /// Remove `[[...]]` tokens from the shown text
    pub strip_refs: bool,
}

/// Text shown for a task, without bullet markup
pub fn task_text(task: &Task, strip_refs: bool) -> String {
    let text = task.display_text();
    if strip_refs {
        strip_reference_tokens(&text)
    } else {
        text
    }
}

pub fn task_to_json(task: &Task, strip_refs: bool) -> TaskJson {
    TaskJson {
        file: task.file.display().to_string(),
        line: task.line_number,
        text: task_text(task, strip_refs),
        status: task.status(),
        priority: task.is_priority(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a task as one line of terminal output
pub fn format_task_line(task: &Task, options: &OutputOptions) -> String {
    let text = task_text(task, options.strip_refs);
    if options.color {
        colorize_checkbox(&text)
    } else {
        text
    }
}

/// Render a task list as the text that goes to stdout (no trailing newline)
pub fn render_tasks(tasks: &[Task], options: &OutputOptions) -> Result<String, serde_json::Error> {
    if options.json {
        let items: Vec<TaskJson> = tasks
            .iter()
            .map(|t| task_to_json(t, options.strip_refs))
            .collect();
        return serde_json::to_string_pretty(&items);
    }
    Ok(tasks
        .iter()
        .map(|t| format_task_line(t, options))
        .collect::<Vec<_>>()
        .join("\n"))
}
