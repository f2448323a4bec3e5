//! Schedule queries.
//!
//! A `Selector` describes which trips to pull out of a [`Schedule`]. It is
//! built up by chaining constraints; each unset constraint matches
//! everything. Constraints that could contradict one another (a date and a
//! day of week, an after and a before time) are checked as soon as the
//! second one is added, so an impossible selector is never evaluated.
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use prt_transit::domain::RouteDirection;
//! use prt_transit::schedule::Selector;
//!
//! let selector = Selector::new()
//!     .for_route_id("61D")
//!     .in_direction(RouteDirection::Inbound)
//!     .on_date(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap())?
//!     .after(NaiveTime::from_hms_opt(18, 0, 0).unwrap())?;
//! # Ok::<(), prt_transit::schedule::SelectorError>(())
//! ```

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::domain::{Route, RouteDirection, ScheduledTrip, Stop};

use super::error::SelectorError;
use super::index::Schedule;

/// A filter over scheduled trips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    route_id: Option<String>,
    stop_id: Option<String>,
    direction: Option<RouteDirection>,
    date: Option<NaiveDate>,
    day_of_week: Option<Weekday>,
    after_time: Option<NaiveTime>,
    before_time: Option<NaiveTime>,
}

impl Selector {
    /// A selector with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only trips on `route`.
    pub fn for_route(self, route: &Route) -> Self {
        self.for_route_id(route.id())
    }

    /// Only trips on the route with id `route_id`.
    pub fn for_route_id(mut self, route_id: impl Into<String>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    /// Only trips that serve `stop`.
    pub fn at_stop(self, stop: &Stop) -> Self {
        self.at_stop_id(stop.id())
    }

    /// Only trips that serve the stop with id `stop_id`.
    pub fn at_stop_id(mut self, stop_id: impl Into<String>) -> Self {
        self.stop_id = Some(stop_id.into());
        self
    }

    /// Only trips travelling in `direction`.
    pub fn in_direction(mut self, direction: RouteDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Only trips that run on `date`.
    ///
    /// Fails if a day of week is already set and `date` falls on a
    /// different one.
    pub fn on_date(mut self, date: NaiveDate) -> Result<Self, SelectorError> {
        if let Some(day_of_week) = self.day_of_week {
            check_weekday(date, day_of_week)?;
        }
        self.date = Some(date);
        Ok(self)
    }

    /// Only trips that run on `day_of_week`.
    ///
    /// Fails if a date is already set and falls on a different weekday.
    pub fn on_day_of_week(mut self, day_of_week: Weekday) -> Result<Self, SelectorError> {
        if let Some(date) = self.date {
            check_weekday(date, day_of_week)?;
        }
        self.day_of_week = Some(day_of_week);
        Ok(self)
    }

    /// Only trips starting strictly after `time`.
    ///
    /// Fails if a `before` time is set and is not strictly later than `time`.
    pub fn after(mut self, time: NaiveTime) -> Result<Self, SelectorError> {
        if let Some(before) = self.before_time {
            check_window(time, before)?;
        }
        self.after_time = Some(time);
        Ok(self)
    }

    /// Only trips starting strictly before `time`.
    ///
    /// Fails if an `after` time is set and `time` is not strictly later.
    pub fn before(mut self, time: NaiveTime) -> Result<Self, SelectorError> {
        if let Some(after) = self.after_time {
            check_window(after, time)?;
        }
        self.before_time = Some(time);
        Ok(self)
    }

    pub fn route_id(&self) -> Option<&str> {
        self.route_id.as_deref()
    }

    pub fn stop_id(&self) -> Option<&str> {
        self.stop_id.as_deref()
    }

    pub fn direction(&self) -> Option<RouteDirection> {
        self.direction
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn day_of_week(&self) -> Option<Weekday> {
        self.day_of_week
    }

    pub fn after_time(&self) -> Option<NaiveTime> {
        self.after_time
    }

    pub fn before_time(&self) -> Option<NaiveTime> {
        self.before_time
    }

    /// Whether `trip` passes every constraint except the route.
    ///
    /// The route is applied by choosing which trips to start from.
    pub fn matches(&self, trip: &ScheduledTrip) -> bool {
        let start = trip.start_time();

        self.stop_id.as_deref().is_none_or(|id| trip.has_stop_id(id))
            && self.direction.is_none_or(|d| trip.direction() == d)
            && self.date.is_none_or(|date| trip.available_on(date))
            && self.day_of_week.is_none_or(|day| trip.available_on_day(day))
            && self.after_time.is_none_or(|after| start > after)
            && self.before_time.is_none_or(|before| start < before)
    }

    /// Trips in `schedule` matching every constraint.
    ///
    /// Starts from the route's trips when a route is set, otherwise from all
    /// trips; order follows the schedule's insertion order.
    pub fn trips(&self, schedule: &Schedule) -> Vec<Arc<ScheduledTrip>> {
        let candidates = match &self.route_id {
            Some(route_id) => schedule.trips_for_route(route_id),
            None => schedule.trips().to_vec(),
        };

        candidates
            .into_iter()
            .filter(|trip| self.matches(trip))
            .collect()
    }
}

fn check_weekday(date: NaiveDate, day_of_week: Weekday) -> Result<(), SelectorError> {
    if date.weekday() == day_of_week {
        Ok(())
    } else {
        Err(SelectorError::DayOfWeekMismatch {
            date,
            date_weekday: date.weekday(),
            day_of_week,
        })
    }
}

fn check_window(after: NaiveTime, before: NaiveTime) -> Result<(), SelectorError> {
    if after < before {
        Ok(())
    } else {
        Err(SelectorError::EmptyTimeWindow { after, before })
    }
}

/// Scheduled arrival times at `stop`, ascending, for the trips that serve it.
///
/// Trips that skip the stop contribute nothing.
pub fn arrival_times_for<I>(trips: I, stop: &Stop) -> Vec<NaiveTime>
where
    I: IntoIterator,
    I::Item: AsRef<ScheduledTrip>,
{
    let mut times: Vec<NaiveTime> = trips
        .into_iter()
        .filter_map(|trip| trip.as_ref().arrival_time_at(stop))
        .collect();
    times.sort();
    times
}
