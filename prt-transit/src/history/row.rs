//! Raw observed-arrival rows and their resolution into history entries.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::cache::IdentityCache;
use crate::domain::{HistoryEntry, Route, RouteDirection, Stop};

use super::error::HistoryError;

/// Accepted timestamp layouts, tried in order. Seconds are optional.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One line of the observed-arrival log. Columns not named here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHistoryRow {
    #[serde(rename = "tatripid")]
    pub trip_id: String,
    /// When the vehicle was actually seen at the stop.
    pub log_time: String,
    pub stop_id: String,
    pub route_id: String,
    /// "INBOUND" or "OUTBOUND", any case.
    pub direction: String,
    pub scheduled_start_date: String,
    pub scheduled_start_time: String,
}

impl RawHistoryRow {
    /// Resolve against the caches and parse the timestamps.
    pub fn resolve(
        &self,
        routes: &IdentityCache<Route>,
        stops: &IdentityCache<Stop>,
    ) -> Result<HistoryEntry, HistoryError> {
        let route_id = self.route_id.trim();
        let route = routes
            .get(route_id)
            .ok_or_else(|| HistoryError::UnknownRoute(route_id.to_string()))?;

        let stop_id = self.stop_id.trim();
        let stop = stops
            .get(stop_id)
            .ok_or_else(|| HistoryError::UnknownStop(stop_id.to_string()))?;

        let direction: RouteDirection = self.direction.parse()?;

        let actual = parse_timestamp("log_time", self.log_time.trim())?;
        let scheduled = parse_timestamp(
            "scheduled_start",
            &format!(
                "{}T{}",
                self.scheduled_start_date.trim(),
                fold_hour_24(self.scheduled_start_time.trim())
            ),
        )?;

        Ok(HistoryEntry::new(
            self.trip_id.trim(),
            route,
            stop,
            direction,
            scheduled,
            actual,
        )?)
    }
}

/// The log writes a just-after-midnight start as "24:MM" while the date has
/// already rolled over, so hour 24 is hour 0 of the same date.
fn fold_hour_24(time: &str) -> String {
    match time.strip_prefix("24:") {
        Some(rest) => format!("00:{rest}"),
        None => time.to_string(),
    }
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, HistoryError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| HistoryError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}
