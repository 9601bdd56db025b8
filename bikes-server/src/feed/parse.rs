//! Station feed document parsing.
//!
//! The feed looks like:
//!
//! ```xml
//! <stations lastUpdate="..." version="2.0">
//!   <station>
//!     <id>1</id>
//!     <name>River Street , Clerkenwell</name>
//!     <terminalName>001023</terminalName>
//!     <lat>51.52916347</lat>
//!     <long>-0.109970527</long>
//!     ...
//!   </station>
//! </stations>
//! ```
//!
//! Only the four fields we serve are read; everything else is ignored.

use serde::Deserialize;

use crate::domain::Station;

use super::error::FeedError;

#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(rename = "station", default)]
    stations: Vec<FeedStation>,
}

#[derive(Debug, Deserialize)]
struct FeedStation {
    #[serde(default)]
    name: String,
    #[serde(rename = "terminalName", default)]
    terminal_name: String,
    #[serde(default)]
    lat: String,
    #[serde(default)]
    long: String,
}

/// Parse a feed document into stations, in document order.
///
/// Text fields are trimmed. A coordinate that isn't a finite number becomes
/// `0.0` rather than failing the whole document; the upstream feed has
/// occasional junk in these fields.
pub fn parse_stations(xml: &str) -> Result<Vec<Station>, FeedError> {
    let doc: FeedDocument = quick_xml::de::from_str(xml).map_err(|e| FeedError::Parse {
        message: e.to_string(),
    })?;

    Ok(doc.stations.into_iter().map(normalize).collect())
}

fn normalize(raw: FeedStation) -> Station {
    Station {
        name: raw.name.trim().to_string(),
        terminal_id: raw.terminal_name.trim().to_string(),
        latitude: parse_coordinate(&raw.lat),
        longitude: parse_coordinate(&raw.long),
    }
}

fn parse_coordinate(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
