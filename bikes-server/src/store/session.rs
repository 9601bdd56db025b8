//! Session and connector traits.
//!
//! The remote client offers no bound parameters, so the whole surface is
//! "run this SQL text and hand back rows".

use std::sync::Arc;

use super::error::StoreError;
use super::rows::ResultSet;

/// A live handle to the store.
pub trait Session: Send + Sync {
    /// Run a read query and return all of its rows.
    fn select(&self, sql: &str) -> Result<ResultSet, StoreError>;

    /// Release the underlying connection. Later `select` calls return
    /// [`StoreError::Closed`]. Closing twice is a no-op.
    fn close(&self);
}

/// Opens sessions from a connection string.
pub trait Connector: Send + Sync {
    fn connect(&self, connection_string: &str) -> Result<Arc<dyn Session>, StoreError>;
}
