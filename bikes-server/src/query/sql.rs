//! Query text builders.
//!
//! The store client can't bind parameters, so values are spliced into the
//! SQL. Only two kinds of value ever are: a [`TerminalId`], which is
//! alphanumeric by construction, and a timestamp rendered by
//! [`timestamp::format`], which is digits, dashes, colons and a space.

use chrono::NaiveDateTime;

use crate::domain::{TerminalId, timestamp};

/// The observation table written by the ingestion job.
pub const TABLE: &str = "livecyclehireupdates";

/// Most history entries returned for one terminal.
pub const HISTORY_LIMIT: usize = 1000;

/// How far back history reaches, in days.
pub const HISTORY_WINDOW_DAYS: i64 = 7;

/// Latest observation for one terminal.
pub(crate) fn status_query(terminal: &TerminalId) -> String {
    format!(
        "SELECT last_update, nb_ebikes, nb_standard_bikes, nb_empty_docks \
         FROM {TABLE} \
         WHERE terminal_name = '{}' \
         ORDER BY last_update DESC \
         LIMIT 1;",
        terminal.as_str()
    )
}

/// Observations for one terminal at or after `cutoff`, newest first.
pub(crate) fn history_query(terminal: &TerminalId, cutoff: &NaiveDateTime) -> String {
    format!(
        "SELECT last_update, nb_standard_bikes, nb_ebikes \
         FROM {TABLE} \
         WHERE terminal_name = '{}' AND last_update >= '{}' \
         ORDER BY last_update DESC \
         LIMIT {HISTORY_LIMIT};",
        terminal.as_str(),
        timestamp::format(cutoff)
    )
}

/// Every terminal that has at least one observation.
pub(crate) fn terminals_query() -> String {
    format!("SELECT DISTINCT terminal_name FROM {TABLE} ORDER BY terminal_name;")
}
