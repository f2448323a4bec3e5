//! Configuration for history queries.

use chrono::TimeDelta;

/// How far an observation's scheduled time may sit from a trip's scheduled
/// arrival and still count as that trip, in whole minutes.
const DEFAULT_TRIP_MATCH_TOLERANCE_MINS: i64 = 10;

/// Configuration parameters for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum scheduled-time gap when matching observations to a trip.
    /// Compared in whole minutes; any seconds part is ignored.
    pub trip_match_tolerance: TimeDelta,
}

impl HistoryConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(trip_match_tolerance: TimeDelta) -> Self {
        Self {
            trip_match_tolerance,
        }
    }

    /// Set the trip-match tolerance.
    pub fn with_trip_match_tolerance(mut self, tolerance: TimeDelta) -> Self {
        self.trip_match_tolerance = tolerance;
        self
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            trip_match_tolerance: TimeDelta::minutes(DEFAULT_TRIP_MATCH_TOLERANCE_MINS),
        }
    }
}
