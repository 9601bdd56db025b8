//! Station status and history queries.
//!
//! Turns a terminal identifier into SQL, runs it on the current store
//! session and decodes the rows into domain records. Identifiers are
//! validated before any query text is built.

mod error;
mod service;
mod sql;

pub use error::QueryError;
pub use service::QueryService;
pub use sql::{HISTORY_LIMIT, HISTORY_WINDOW_DAYS, TABLE};
