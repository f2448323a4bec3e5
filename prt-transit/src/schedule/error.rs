//! Schedule error types.

use chrono::{NaiveDate, NaiveTime, Weekday};

/// Errors that abort schedule construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// A row references a route the route cache does not know
    #[error("route {route_id} for trip {trip_id} not found in route cache")]
    UnknownRoute { route_id: String, trip_id: String },

    /// The process-wide schedule was already installed
    #[error("schedule already installed")]
    AlreadyInstalled,
}

/// Contradictory constraints given to a [`Selector`](super::Selector).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// Date falls on a different weekday than the requested day of week
    #[error("date {date} falls on {date_weekday}, incompatible with day of week {day_of_week}")]
    DayOfWeekMismatch {
        date: NaiveDate,
        date_weekday: Weekday,
        day_of_week: Weekday,
    },

    /// `before` is not strictly later than `after`
    #[error("empty time window: before {before} is not after {after}")]
    EmptyTimeWindow { after: NaiveTime, before: NaiveTime },
}
