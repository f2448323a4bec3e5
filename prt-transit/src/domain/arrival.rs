//! Arrivals of a vehicle at a stop.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveTime;

use super::{Route, RouteDirection, Stop, parse_gtfs_time_or_midnight};

/// Something that arrives at a stop at a time of day.
pub trait Arrival {
    /// Time of day of the arrival.
    fn time(&self) -> NaiveTime;

    /// Stop being arrived at.
    fn stop(&self) -> &Stop;

    /// Route the vehicle is running.
    fn route(&self) -> &Route;

    /// Direction of travel along the route.
    fn direction(&self) -> RouteDirection;
}

/// A published arrival time at a stop, from the GTFS schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledArrival {
    stop: Arc<Stop>,
    time: NaiveTime,
    route: Arc<Route>,
    direction: RouteDirection,
}

impl ScheduledArrival {
    pub fn new(
        stop: Arc<Stop>,
        time: NaiveTime,
        route: Arc<Route>,
        direction: RouteDirection,
    ) -> Self {
        Self {
            stop,
            time,
            route,
            direction,
        }
    }

    /// Build from a raw GTFS arrival time string.
    ///
    /// Post-midnight times ("24:00:05") are folded onto the clock; anything
    /// unparseable becomes 00:00:00 with a logged warning.
    pub fn from_gtfs(
        stop: Arc<Stop>,
        arrival_time: &str,
        route: Arc<Route>,
        direction: RouteDirection,
    ) -> Self {
        Self::new(stop, parse_gtfs_time_or_midnight(arrival_time), route, direction)
    }

    /// Shared handle to the stop.
    pub fn stop_arc(&self) -> &Arc<Stop> {
        &self.stop
    }

    /// Shared handle to the route.
    pub fn route_arc(&self) -> &Arc<Route> {
        &self.route
    }
}

impl Arrival for ScheduledArrival {
    fn time(&self) -> NaiveTime {
        self.time
    }

    fn stop(&self) -> &Stop {
        &self.stop
    }

    fn route(&self) -> &Route {
        &self.route
    }

    fn direction(&self) -> RouteDirection {
        self.direction
    }
}

impl fmt::Display for ScheduledArrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n  Arrival time: {}", self.stop, self.time)
    }
}

/// Sort arrivals ascending by time of day. Ties keep their input order.
pub fn sort_by_time<A: Arrival>(arrivals: &mut [A]) {
    arrivals.sort_by_key(|a| a.time());
}
