//! SQLite-backed session.
//!
//! The connection string is handed straight to SQLite, so it may be a
//! plain path or a `file:` URI. Connections are opened read-only: this
//! service never writes to the observation table.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use super::error::StoreError;
use super::rows::{ResultSet, Value};
use super::session::{Connector, Session};

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Query {
            message: err.to_string(),
        }
    }
}

/// Opens read-only SQLite sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector;

impl SqliteConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Connector for SqliteConnector {
    fn connect(&self, connection_string: &str) -> Result<Arc<dyn Session>, StoreError> {
        if connection_string.is_empty() {
            return Err(StoreError::MissingConnectionString);
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(connection_string, flags).map_err(|e| {
            StoreError::Connection {
                message: e.to_string(),
            }
        })?;

        debug!("opened SQLite session");

        Ok(Arc::new(SqliteSession {
            conn: Mutex::new(Some(conn)),
        }))
    }
}

/// A single SQLite connection shared between request threads.
///
/// `rusqlite::Connection` is `Send` but not `Sync`, so queries on one
/// session are serialized by the mutex. Since the manager holds exactly one
/// session, concurrent requests queue here and store throughput is that of
/// a single connection; a slow query delays every request behind it.
/// `None` means closed.
pub struct SqliteSession {
    conn: Mutex<Option<Connection>>,
}

impl SqliteSession {
    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Session for SqliteSession {
    fn select(&self, sql: &str) -> Result<ResultSet, StoreError> {
        let guard = self.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;

        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(match row.get_ref(i)? {
                    ValueRef::Null => Value::Null,
                    ValueRef::Integer(v) => Value::Integer(v),
                    ValueRef::Real(v) => Value::Real(v),
                    ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Blob(b) => Value::Blob(b.to_vec()),
                });
            }
            out.push(values);
        }

        Ok(ResultSet::new(columns, out))
    }

    fn close(&self) {
        let Some(conn) = self.lock().take() else {
            return;
        };
        if let Err((_, e)) = conn.close() {
            warn!(error = %e, "error while closing SQLite session");
        }
    }
}
