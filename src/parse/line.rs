//! Task line grammar.
//!
//! A task line is optional leading whitespace, a bullet (`-` or `*`), exactly
//! one space, then a checkbox `[c]` holding exactly one character. Anything
//! may follow the checkbox, including nothing.

use std::ops::Range;

use crate::model::task::{Checkbox, Status};

/// The bullet characters that may introduce a task
fn is_bullet(c: char) -> bool {
    c == '-' || c == '*'
}

/// Locate the checkbox token of a task line.
///
/// Returns the byte range of `[c]` within `line` and the character between
/// the brackets, or `None` if the line is not a task line.
pub fn checkbox_span(line: &str) -> Option<(Range<usize>, char)> {
    let body = line.trim_start();
    let offset = line.len() - body.len();

    let mut chars = body.char_indices();
    let (_, bullet) = chars.next()?;
    if !is_bullet(bullet) {
        return None;
    }
    if chars.next()?.1 != ' ' {
        return None;
    }
    let (open, bracket) = chars.next()?;
    if bracket != '[' {
        return None;
    }
    let (_, inner) = chars.next()?;
    let (close, bracket) = chars.next()?;
    if bracket != ']' {
        return None;
    }

    Some((offset + open..offset + close + 1, inner))
}

pub fn is_task_line(line: &str) -> bool {
    checkbox_span(line).is_some()
}

/// Checkbox of a task line, `None` if the line is not a task.
pub fn checkbox_of(line: &str) -> Option<Checkbox> {
    checkbox_span(line).map(|(_, c)| Checkbox::from_char(c))
}

/// Named status of a task line. Task lines with an unrecognized checkbox
/// character have no status; use [`checkbox_of`] to tell them apart from
/// non-task lines.
pub fn status_of(line: &str) -> Option<Status> {
    checkbox_of(line).and_then(Checkbox::status)
}

/// Text following the closing `]` of the checkbox
pub fn after_checkbox(line: &str) -> Option<&str> {
    checkbox_span(line).map(|(span, _)| &line[span.end..])
}

/// A priority task has exactly ` ! ` right after its checkbox.
pub fn is_priority(line: &str) -> bool {
    after_checkbox(line).is_some_and(|rest| rest.starts_with(" ! "))
}
