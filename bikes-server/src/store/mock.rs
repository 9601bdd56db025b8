//! Scripted store doubles for tests.
//!
//! Every session opened by a [`MockConnector`] shares one query log and
//! one responder, so tests can see exactly what SQL reached the "store".

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::StoreError;
use super::rows::ResultSet;
use super::session::{Connector, Session};

type Responder = dyn Fn(&str) -> Result<ResultSet, StoreError> + Send + Sync;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shared {
    responder: Box<Responder>,
    queries: Mutex<Vec<String>>,
    connects: AtomicUsize,
    fail_connects: AtomicBool,
}

/// Connector handing out [`MockSession`]s.
#[derive(Clone)]
pub struct MockConnector {
    shared: Arc<Shared>,
    sessions: Arc<Mutex<Vec<Arc<MockSession>>>>,
}

impl MockConnector {
    /// A connector whose sessions answer every query with an empty result.
    pub fn new() -> Self {
        Self::with_responder(|_| Ok(ResultSet::empty()))
    }

    /// A connector whose sessions answer queries with `responder`.
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<ResultSet, StoreError> + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                responder: Box::new(responder),
                queries: Mutex::new(Vec::new()),
                connects: AtomicUsize::new(0),
                fail_connects: AtomicBool::new(false),
            }),
            sessions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make subsequent `connect` calls fail (or succeed again).
    pub fn fail_connects(&self, fail: bool) {
        self.shared.fail_connects.store(fail, Ordering::SeqCst);
    }

    /// Number of successful connects so far.
    pub fn connect_count(&self) -> usize {
        self.shared.connects.load(Ordering::SeqCst)
    }

    /// The `index`th session opened, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `index + 1` sessions have been opened.
    pub fn session(&self, index: usize) -> Arc<MockSession> {
        Arc::clone(&lock(&self.sessions)[index])
    }

    /// Every SQL string sent to any session, in order.
    pub fn queries(&self) -> Vec<String> {
        lock(&self.shared.queries).clone()
    }
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for MockConnector {
    fn connect(&self, _connection_string: &str) -> Result<Arc<dyn Session>, StoreError> {
        if self.shared.fail_connects.load(Ordering::SeqCst) {
            return Err(StoreError::Connection {
                message: "connection refused".to_string(),
            });
        }

        let session = Arc::new(MockSession {
            shared: Arc::clone(&self.shared),
            dead: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        });
        lock(&self.sessions).push(Arc::clone(&session));
        self.shared.connects.fetch_add(1, Ordering::SeqCst);

        Ok(session)
    }
}

/// A session that records queries and can be killed on demand.
pub struct MockSession {
    shared: Arc<Shared>,
    dead: AtomicBool,
    closed: AtomicBool,
}

impl MockSession {
    /// Simulate the server dropping the connection.
    pub fn kill(&self) {
        self.dead.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Session for MockSession {
    fn select(&self, sql: &str) -> Result<ResultSet, StoreError> {
        lock(&self.shared.queries).push(sql.to_string());

        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        if self.dead.load(Ordering::SeqCst) {
            return Err(StoreError::Connection {
                message: "connection reset by peer".to_string(),
            });
        }

        (self.shared.responder)(sql)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
