//! Raw schedule rows.

use serde::Deserialize;

/// One stop time from the flattened schedule file, before resolution
/// against the route and stop caches.
///
/// Both the GTFS column names and the flattened file's own names
/// (`route_direction`, `stop_latitude`, `stop_longitude`) are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawScheduleRow {
    pub trip_id: String,
    pub route_id: String,
    /// GTFS `service_id`, decoded into a `ServiceAvailability`.
    #[serde(rename = "service_id")]
    pub service_code: String,
    /// GTFS `direction_id`: 0 = outbound, 1 = inbound.
    #[serde(rename = "direction_id", alias = "route_direction")]
    pub direction_code: u8,
    /// "HH:MM:SS" (or "HH:MM"), possibly with an hour of 24 or more.
    pub arrival_time: String,
    pub stop_id: String,
    pub stop_name: String,
    #[serde(alias = "stop_latitude")]
    pub stop_lat: f64,
    #[serde(alias = "stop_longitude")]
    pub stop_lon: f64,
}
