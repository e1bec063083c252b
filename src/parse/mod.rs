pub mod display;
pub mod line;
pub mod reference;

pub use display::{colorize_checkbox, display_text};
pub use line::{checkbox_of, is_priority, is_task_line, status_of};
pub use reference::{
    calendar_references, date_references, has_reference, is_calendar_note,
    parse_daily_note_date, strip_reference_tokens,
};
