//! Live station feed.
//!
//! Fetches the third-party XML document listing every docking station and
//! normalizes it into [`Station`](crate::domain::Station) records. The
//! store is not involved.

mod client;
mod error;
mod parse;

pub use client::{DEFAULT_FEED_URL, DEFAULT_USER_AGENT, FeedClient, FeedConfig};
pub use error::FeedError;
pub use parse::parse_stations;
