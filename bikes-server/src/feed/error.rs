//! Feed error types.

/// Errors from fetching or parsing the station feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned a non-success status
    #[error("feed returned status {status}")]
    Status { status: u16 },

    /// Body was not a well-formed station document
    #[error("XML parse error: {message}")]
    Parse { message: String },

    /// Client configuration was rejected
    #[error("invalid feed configuration: {message}")]
    InvalidConfig { message: String },
}

impl FeedError {
    /// Whether the document arrived but could not be understood.
    pub fn is_parse(&self) -> bool {
        matches!(self, FeedError::Parse { .. })
    }
}
