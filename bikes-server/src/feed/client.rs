//! Live station feed HTTP client.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::domain::Station;

use super::error::FeedError;
use super::parse::parse_stations;

/// Default URL for the TfL cycle hire feed.
pub const DEFAULT_FEED_URL: &str =
    "https://tfl.gov.uk/tfl/syndication/feeds/cycle-hire/livecyclehireupdates.xml";

/// The feed rejects requests carrying a default client user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; CustomAgent/1.0)";

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Feed document URL
    pub url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a config pointing at the live feed.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom feed URL (for testing).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the live station feed.
///
/// Each call is one fetch-then-parse pass. Nothing is cached or retried
/// here; that is the caller's decision.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|_| FeedError::InvalidConfig {
            message: format!("invalid user agent {:?}", config.user_agent),
        })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// The URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse every station in the feed.
    pub async fn fetch_all_stations(&self) -> Result<Vec<Station>, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let stations = parse_stations(&body)?;
        debug!(count = stations.len(), "parsed station feed");

        Ok(stations)
    }
}
