//! Station records served by the API.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::timestamp;

/// A docking station as described by the live feed.
///
/// Identity is the terminal name. Stations are built fresh from each feed
/// fetch and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub name: String,
    #[serde(rename = "terminal_name")]
    pub terminal_id: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "long")]
    pub longitude: f64,
}

/// The most recent observation for one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStatus {
    #[serde(serialize_with = "timestamp::serialize")]
    pub last_update: NaiveDateTime,
    #[serde(rename = "nb_ebikes")]
    pub ebike_count: u32,
    #[serde(rename = "nb_standard_bikes")]
    pub standard_bike_count: u32,
    #[serde(rename = "nb_empty_docks")]
    pub empty_dock_count: u32,
}

/// One observation in a station's recent history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationHistoryEntry {
    #[serde(serialize_with = "timestamp::serialize")]
    pub last_update: NaiveDateTime,
    #[serde(rename = "nb_standard_bikes")]
    pub standard_bike_count: u32,
    #[serde(rename = "nb_ebikes")]
    pub ebike_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        timestamp::parse(s).unwrap()
    }

    #[test]
    fn station_uses_feed_key_names() {
        let station = Station {
            name: "King's Cross".to_string(),
            terminal_id: "001023".to_string(),
            latitude: 51.5,
            longitude: -0.12,
        };

        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "King's Cross",
                "terminal_name": "001023",
                "lat": 51.5,
                "long": -0.12,
            })
        );
    }

    #[test]
    fn status_serializes_in_column_order() {
        let status = StationStatus {
            last_update: at("2024-01-01 10:00:00"),
            ebike_count: 3,
            standard_bike_count: 5,
            empty_dock_count: 2,
        };

        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(
            json,
            r#"{"last_update":"2024-01-01 10:00:00","nb_ebikes":3,"nb_standard_bikes":5,"nb_empty_docks":2}"#
        );
    }

    #[test]
    fn history_entry_serialization() {
        let entry = StationHistoryEntry {
            last_update: at("2024-03-15 08:30:00"),
            standard_bike_count: 7,
            ebike_count: 1,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"last_update":"2024-03-15 08:30:00","nb_standard_bikes":7,"nb_ebikes":1}"#
        );
    }
}
