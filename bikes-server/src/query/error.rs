//! Query service error types.

use crate::domain::{InvalidTerminalId, TerminalId};
use crate::store::StoreError;

/// Errors from station queries.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The terminal identifier failed validation; the store was not touched
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidTerminalId),

    /// The identifier is valid but the store has no observations for it
    #[error("no observations for terminal {terminal}")]
    NotFound { terminal: TerminalId },

    /// The session is closed or the connection dropped
    #[error("store unavailable while {intent}: {source}")]
    StoreUnavailable {
        intent: &'static str,
        #[source]
        source: StoreError,
    },

    /// The query failed or a column could not be decoded
    #[error("store error while {intent}: {source}")]
    Store {
        intent: &'static str,
        #[source]
        source: StoreError,
    },
}

impl QueryError {
    /// Classify a store failure for the given query intent.
    pub(crate) fn from_store(intent: &'static str, source: StoreError) -> Self {
        if source.is_unavailable() {
            QueryError::StoreUnavailable { intent, source }
        } else {
            QueryError::Store { intent, source }
        }
    }
}
