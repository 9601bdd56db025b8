//! Bike-share station API server.
//!
//! Serves live station metadata from the TfL cycle hire feed, and
//! per-station status and history read from a remote SQL store that a
//! separate ingestion job keeps populated.

pub mod config;
pub mod domain;
pub mod feed;
pub mod query;
pub mod store;
pub mod web;
