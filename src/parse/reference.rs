//! `[[name]]` reference tokens and date-shaped note names.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid reference regex"));

static CALENDAR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}(-\d{2}-\d{2})?$").expect("valid calendar regex"));

static DAILY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid daily note regex")
});

/// Names inside every `[[...]]` token, in order of appearance
pub fn reference_names(line: &str) -> impl Iterator<Item = &str> {
    REFERENCE_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Does `line` contain the literal token `[[name]]`?
pub fn has_reference(line: &str, name: &str) -> bool {
    line.contains(&format!("[[{}]]", name))
}

/// A bare year (`2026`) or an ISO date (`2026-01-17`). The date is not
/// checked for validity.
pub fn is_calendar_name(name: &str) -> bool {
    CALENDAR_NAME_RE.is_match(name)
}

/// Year- or date-shaped reference names found in `line`
pub fn calendar_references(line: &str) -> BTreeSet<String> {
    reference_names(line)
        .filter(|name| is_calendar_name(name))
        .map(str::to_string)
        .collect()
}

/// Parse a strict `yyyy-mm-dd` name into a date. Out-of-range months or
/// days yield `None`.
fn parse_iso_date(name: &str) -> Option<NaiveDate> {
    let caps = DAILY_NAME_RE.captures(name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Valid calendar dates referenced from `line`, in order of appearance.
/// Malformed dates such as `[[2026-99-99]]` are skipped.
pub fn date_references(line: &str) -> Vec<NaiveDate> {
    reference_names(line).filter_map(parse_iso_date).collect()
}

/// Whether a note's file stem names a year or a day
pub fn is_calendar_note(stem: &str) -> bool {
    is_calendar_name(stem)
}

/// Date of a daily note from its file stem
pub fn parse_daily_note_date(stem: &str) -> Option<NaiveDate> {
    parse_iso_date(stem)
}

/// Remove every `[[...]]` token and collapse the leftover whitespace.
pub fn strip_reference_tokens(text: &str) -> String {
    let without = REFERENCE_RE.replace_all(text, "");
    without.split_whitespace().collect::<Vec<_>>().join(" ")
}
