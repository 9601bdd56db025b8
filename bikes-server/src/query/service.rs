//! Station queries against the current store session.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use tracing::{debug, error};

use crate::domain::{StationHistoryEntry, StationStatus, TerminalId, timestamp};
use crate::store::{ResultSet, SessionManager, StoreError};

use super::error::QueryError;
use super::sql::{
    HISTORY_LIMIT, HISTORY_WINDOW_DAYS, history_query, status_query, terminals_query,
};

const STATUS_INTENT: &str = "fetching station status";
const HISTORY_INTENT: &str = "fetching station history";
const TERMINALS_INTENT: &str = "listing terminals";

/// Read-only queries over the observation table.
///
/// Every call is blocking and independent; callers on an async runtime
/// should run it on the blocking pool.
#[derive(Clone)]
pub struct QueryService {
    sessions: Arc<SessionManager>,
}

impl QueryService {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// Latest observation for a terminal.
    ///
    /// Returns [`QueryError::NotFound`] if the terminal has no rows at all.
    pub fn get_status(&self, terminal: &str) -> Result<StationStatus, QueryError> {
        let terminal = TerminalId::parse(terminal)?;
        let rows = self.select(&terminal, STATUS_INTENT, &status_query(&terminal))?;

        if rows.is_empty() {
            debug!(terminal = %terminal, "no observations for station");
            return Err(QueryError::NotFound { terminal });
        }

        let decode = || -> Result<StationStatus, StoreError> {
            Ok(StationStatus {
                last_update: decode_timestamp(&rows, 0, 0)?,
                ebike_count: decode_count(&rows, 0, 1)?,
                standard_bike_count: decode_count(&rows, 0, 2)?,
                empty_dock_count: decode_count(&rows, 0, 3)?,
            })
        };

        decode().map_err(|e| fail(&terminal, STATUS_INTENT, e))
    }

    /// Observations for a terminal from the last seven days, newest first.
    pub fn get_history(&self, terminal: &str) -> Result<Vec<StationHistoryEntry>, QueryError> {
        self.get_history_at(terminal, Utc::now().naive_utc())
    }

    /// [`get_history`](Self::get_history) with an explicit "now".
    ///
    /// The window is `[now - 7 days, now]` at second resolution; an entry
    /// exactly at the cutoff is included. At most 1000 entries are returned.
    pub fn get_history_at(
        &self,
        terminal: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<StationHistoryEntry>, QueryError> {
        let terminal = TerminalId::parse(terminal)?;
        let cutoff = history_cutoff(now);
        let rows = self.select(&terminal, HISTORY_INTENT, &history_query(&terminal, &cutoff))?;

        let mut entries = Vec::with_capacity(rows.row_count().min(HISTORY_LIMIT));
        for row in 0..rows.row_count() {
            let entry = decode_history_row(&rows, row)
                .map_err(|e| fail(&terminal, HISTORY_INTENT, e))?;

            if entry.last_update < cutoff {
                continue;
            }
            entries.push(entry);
            if entries.len() == HISTORY_LIMIT {
                break;
            }
        }

        Ok(entries)
    }

    /// Distinct terminal names that have at least one observation.
    pub fn list_terminals(&self) -> Result<Vec<String>, QueryError> {
        let sql = terminals_query();
        let rows = self
            .sessions
            .current()
            .select(&sql)
            .map_err(|e| {
                error!(intent = TERMINALS_INTENT, error = %e, "store query failed");
                QueryError::from_store(TERMINALS_INTENT, e)
            })?;

        (0..rows.row_count())
            .map(|row| rows.string_value(row, 0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                error!(intent = TERMINALS_INTENT, error = %e, "failed to decode row");
                QueryError::from_store(TERMINALS_INTENT, e)
            })
    }

    fn select(
        &self,
        terminal: &TerminalId,
        intent: &'static str,
        sql: &str,
    ) -> Result<ResultSet, QueryError> {
        self.sessions
            .current()
            .select(sql)
            .map_err(|e| fail(terminal, intent, e))
    }
}

fn fail(terminal: &TerminalId, intent: &'static str, err: StoreError) -> QueryError {
    error!(terminal = %terminal, intent, error = %err, "store query failed");
    QueryError::from_store(intent, err)
}

/// Start of the history window, truncated to whole seconds to match the
/// stored timestamp resolution.
fn history_cutoff(now: NaiveDateTime) -> NaiveDateTime {
    let cutoff = now - Duration::days(HISTORY_WINDOW_DAYS);
    cutoff.with_nanosecond(0).unwrap_or(cutoff)
}

fn decode_history_row(rows: &ResultSet, row: usize) -> Result<StationHistoryEntry, StoreError> {
    Ok(StationHistoryEntry {
        last_update: decode_timestamp(rows, row, 0)?,
        standard_bike_count: decode_count(rows, row, 1)?,
        ebike_count: decode_count(rows, row, 2)?,
    })
}

fn decode_timestamp(
    rows: &ResultSet,
    row: usize,
    column: usize,
) -> Result<NaiveDateTime, StoreError> {
    let raw = rows.string_value(row, column)?;
    timestamp::parse(&raw).map_err(|e| StoreError::Decode {
        row,
        column,
        message: format!("bad timestamp {raw:?}: {e}"),
    })
}

fn decode_count(rows: &ResultSet, row: usize, column: usize) -> Result<u32, StoreError> {
    let raw = rows.i64_value(row, column)?;
    u32::try_from(raw).map_err(|_| StoreError::Decode {
        row,
        column,
        message: format!("count out of range: {raw}"),
    })
}
