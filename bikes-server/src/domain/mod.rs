//! Domain types for the bike-share API.
//!
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod station;
mod terminal;
pub mod timestamp;

pub use station::{Station, StationHistoryEntry, StationStatus};
pub use terminal::{InvalidTerminalId, MAX_TERMINAL_ID_LEN, TerminalId};
