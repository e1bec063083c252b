use super::line::checkbox_span;

pub const ANSI_RED: &str = "\x1b[31m";
pub const ANSI_GREEN: &str = "\x1b[32m";
pub const ANSI_GREY: &str = "\x1b[90m";
pub const ANSI_RESET: &str = "\x1b[0m";

/// Drop the bullet markup in front of the checkbox: `  - [ ] hi` becomes
/// `[ ] hi`. Lines without a checkbox fall back to the first `[`.
pub fn display_text(raw: &str) -> String {
    let start = match checkbox_span(raw) {
        Some((span, _)) => Some(span.start),
        None => raw.find('['),
    };
    match start {
        Some(i) => raw[i..].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Wrap a leading checkbox token in an ANSI color. Unknown tokens and text
/// that does not start with `[c]` are returned unchanged.
pub fn colorize_checkbox(text: &str) -> String {
    let mut chars = text.char_indices();
    let token_end = match (chars.next(), chars.next(), chars.next()) {
        (Some((_, '[')), Some((_, _)), Some((i, ']'))) => i + 1,
        _ => return text.to_string(),
    };

    let (token, rest) = text.split_at(token_end);
    let color = match token {
        "[ ]" => ANSI_RED,
        "[x]" | "[X]" => ANSI_GREEN,
        "[-]" | "[>]" => ANSI_GREY,
        _ => return text.to_string(),
    };
    format!("{}{}{}{}", color, token, ANSI_RESET, rest)
}
