//! On-disk SQLite fixtures shaped like the observation table.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::{Connection, params};
use tempfile::TempDir;

use super::manager::SessionManager;
use super::sqlite::SqliteConnector;

const SCHEMA: &str = "CREATE TABLE livecyclehireupdates (
    terminal_name TEXT NOT NULL,
    last_update TEXT NOT NULL,
    nb_ebikes INTEGER,
    nb_standard_bikes INTEGER,
    nb_empty_docks INTEGER
);";

/// A temporary database holding one observation table.
pub(crate) struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bikes.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        Self { _dir: dir, path }
    }

    pub(crate) fn connection_string(&self) -> String {
        self.path.to_str().unwrap().to_string()
    }

    pub(crate) fn insert(
        &self,
        terminal: &str,
        last_update: &str,
        ebikes: i64,
        standard_bikes: i64,
        empty_docks: i64,
    ) {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute(
            "INSERT INTO livecyclehireupdates VALUES (?1, ?2, ?3, ?4, ?5)",
            params![terminal, last_update, ebikes, standard_bikes, empty_docks],
        )
        .unwrap();
    }

    /// Run arbitrary setup SQL, e.g. bulk inserts or odd values.
    pub(crate) fn execute(&self, sql: &str) {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    pub(crate) fn manager(&self) -> Arc<SessionManager> {
        Arc::new(
            SessionManager::init(Arc::new(SqliteConnector::new()), self.connection_string())
                .unwrap(),
        )
    }
}
