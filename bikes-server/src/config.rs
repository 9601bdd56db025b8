//! Process configuration from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::feed::DEFAULT_FEED_URL;
use crate::store::DEFAULT_KEEPALIVE_INTERVAL;

/// Environment variable holding the store connection string.
pub const CONNECTION_STRING_VAR: &str = "SQLITECLOUD_CONN_STR";
/// Environment variable for the listen address.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
/// Environment variable for the keep-alive interval in seconds.
pub const KEEPALIVE_INTERVAL_VAR: &str = "KEEPALIVE_INTERVAL_SECS";
/// Environment variable overriding the station feed URL.
pub const FEED_URL_VAR: &str = "FEED_URL";

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);

/// Errors loading configuration. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("SQLITECLOUD_CONN_STR environment variable not set")]
    MissingConnectionString,

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store connection string
    pub connection_string: String,
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Time between session liveness checks
    pub keepalive_interval: Duration,
    /// Station feed URL
    pub feed_url: String,
}

impl AppConfig {
    /// Create a config with defaults for everything but the connection string.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
            feed_url: DEFAULT_FEED_URL.to_string(),
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to read variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string = lookup(CONNECTION_STRING_VAR)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingConnectionString)?;

        let mut config = Self::new(connection_string);

        if let Some(raw) = lookup(BIND_ADDR_VAR) {
            let addr = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: BIND_ADDR_VAR,
                value: raw.clone(),
            })?;
            config = config.with_bind_addr(addr);
        }

        if let Some(raw) = lookup(KEEPALIVE_INTERVAL_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: KEEPALIVE_INTERVAL_VAR,
                    value: raw.clone(),
                })?;
            config = config.with_keepalive_interval(Duration::from_secs(secs));
        }

        if let Some(url) = lookup(FEED_URL_VAR).filter(|s| !s.trim().is_empty()) {
            config = config.with_feed_url(url);
        }

        Ok(config)
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the liveness check interval.
    pub fn with_keepalive_interval(mut self, interval: Duration) -> Self {
        self.keepalive_interval = interval;
        self
    }

    /// Set the station feed URL.
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }
}
