//! Application state for the web layer.

use std::sync::Arc;

use crate::feed::FeedClient;
use crate::query::QueryService;
use crate::store::SessionManager;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station status and history queries
    pub queries: QueryService,

    /// Live station feed client
    pub feed: Arc<FeedClient>,

    /// Store session manager, for health reporting
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(sessions: Arc<SessionManager>, feed: FeedClient) -> Self {
        Self {
            queries: QueryService::new(Arc::clone(&sessions)),
            feed: Arc::new(feed),
            sessions,
        }
    }
}
