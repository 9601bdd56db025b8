//! Store error types.

/// Errors from talking to the remote store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No connection string was supplied
    #[error("store connection string is empty")]
    MissingConnectionString,

    /// Establishing the connection failed, or an established one dropped
    #[error("connection error: {message}")]
    Connection { message: String },

    /// The session has been closed and can no longer serve queries
    #[error("session is closed")]
    Closed,

    /// The store rejected or failed to execute a query
    #[error("query failed: {message}")]
    Query { message: String },

    /// A cell could not be decoded into the requested type
    #[error("cannot decode row {row}, column {column}: {message}")]
    Decode {
        row: usize,
        column: usize,
        message: String,
    },
}

impl StoreError {
    /// Whether the failure means the store itself is unreachable, as opposed
    /// to a problem with a particular query or its result.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Connection { .. } | StoreError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(StoreError::Closed.to_string(), "session is closed");

        let err = StoreError::Decode {
            row: 0,
            column: 2,
            message: "expected integer, found NULL".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot decode row 0, column 2: expected integer, found NULL"
        );
    }

    #[test]
    fn unavailable_classification() {
        assert!(StoreError::Closed.is_unavailable());
        assert!(
            StoreError::Connection {
                message: "reset".into()
            }
            .is_unavailable()
        );
        assert!(
            !StoreError::Query {
                message: "no such table".into()
            }
            .is_unavailable()
        );
        assert!(!StoreError::MissingConnectionString.is_unavailable());
    }
}
