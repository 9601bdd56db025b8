//! Remote store access.
//!
//! The store is a SQL database reached through a client with no bound
//! parameters. This module owns the connection lifecycle: the
//! [`SessionManager`] holds the single live [`Session`], probes it on a
//! timer and swaps in a fresh one when it dies.

mod error;
mod manager;
#[cfg(test)]
pub(crate) mod mock;
mod rows;
mod session;
mod sqlite;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::StoreError;
pub use manager::{
    DEFAULT_KEEPALIVE_INTERVAL, LIVENESS_QUERY, LivenessOutcome, MonitorHandle, SessionManager,
};
pub use rows::{ResultSet, Value};
pub use session::{Connector, Session};
pub use sqlite::{SqliteConnector, SqliteSession};
