//! Text timestamps as stored in the observations table.

use chrono::NaiveDateTime;
use serde::Serializer;

/// Storage format for `last_update`, e.g. `2024-01-01 10:00:00`.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a stored timestamp.
pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), FORMAT)
}

/// Format a timestamp the way the store writes it.
///
/// Lexicographic order of the output matches chronological order, which
/// the window queries rely on.
pub fn format(t: &NaiveDateTime) -> String {
    t.format(FORMAT).to_string()
}

pub(crate) fn serialize<S: Serializer>(t: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&t.format(FORMAT))
}
