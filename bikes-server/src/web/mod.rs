//! Web layer for the bike-share API.
//!
//! Provides HTTP endpoints for the live station list and per-station
//! status and history.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
