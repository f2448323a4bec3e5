//! Observed arrival records.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};

use super::{DomainError, Route, RouteDirection, Stop};

/// One observed arrival of a trip at a stop, with its scheduled time.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    trip_id: String,
    route: Arc<Route>,
    stop: Arc<Stop>,
    direction: RouteDirection,
    scheduled_time: NaiveDateTime,
    actual_arrival_time: NaiveDateTime,
}

impl HistoryEntry {
    /// Create an entry. Fails if `trip_id` is blank.
    pub fn new(
        trip_id: impl Into<String>,
        route: Arc<Route>,
        stop: Arc<Stop>,
        direction: RouteDirection,
        scheduled_time: NaiveDateTime,
        actual_arrival_time: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        let trip_id = trip_id.into();
        if trip_id.trim().is_empty() {
            return Err(DomainError::BlankTripId);
        }

        Ok(Self {
            trip_id,
            route,
            stop,
            direction,
            scheduled_time,
            actual_arrival_time,
        })
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn stop(&self) -> &Arc<Stop> {
        &self.stop
    }

    pub fn direction(&self) -> RouteDirection {
        self.direction
    }

    pub fn scheduled_time(&self) -> NaiveDateTime {
        self.scheduled_time
    }

    pub fn actual_arrival_time(&self) -> NaiveDateTime {
        self.actual_arrival_time
    }

    /// Actual minus scheduled, truncated to whole seconds.
    ///
    /// Negative when the vehicle arrived early.
    pub fn arrival_deviation(&self) -> TimeDelta {
        let seconds = self
            .actual_arrival_time
            .signed_duration_since(self.scheduled_time)
            .num_seconds();
        TimeDelta::seconds(seconds)
    }

    /// Deviation floored at zero: early arrivals count as on time.
    pub fn arrival_delay(&self) -> TimeDelta {
        self.arrival_deviation().max(TimeDelta::zero())
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route: {}; direction: {}; stop: {}; actual arrival: {}; scheduled arrival: {};",
            self.route, self.direction, self.stop, self.actual_arrival_time, self.scheduled_time
        )
    }
}
