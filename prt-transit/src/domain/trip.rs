//! Scheduled trips.
//!
//! A `ScheduledTrip` is one run of a vehicle along a route in one direction,
//! with its published arrival time at every stop it serves.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use super::arrival::sort_by_time;
use super::{Arrival, DomainError, Route, RouteDirection, ScheduledArrival, ServiceAvailability, Stop};

/// One scheduled run of a route.
///
/// Holds at most one arrival per stop id. Arrivals are kept sorted by time
/// of day, so the first is always the trip's start.
#[derive(Debug, Clone)]
pub struct ScheduledTrip {
    direction: RouteDirection,
    trip_id: String,
    route: Arc<Route>,
    availability: ServiceAvailability,
    /// Arrivals ascending by time.
    arrivals: Vec<ScheduledArrival>,
    /// Stop id -> index into `arrivals`.
    by_stop: HashMap<String, usize>,
}

impl ScheduledTrip {
    /// Build a trip from its arrivals.
    ///
    /// If several arrivals share a stop id the last one wins. Fails if
    /// `arrivals` is empty.
    pub fn new(
        direction: RouteDirection,
        trip_id: impl Into<String>,
        route: Arc<Route>,
        availability: ServiceAvailability,
        arrivals: Vec<ScheduledArrival>,
    ) -> Result<Self, DomainError> {
        let trip_id = trip_id.into();

        let mut latest: HashMap<String, ScheduledArrival> = HashMap::with_capacity(arrivals.len());
        let mut first_seen: Vec<String> = Vec::with_capacity(arrivals.len());
        for arrival in arrivals {
            let stop_id = arrival.stop().id().to_string();
            if latest.insert(stop_id.clone(), arrival).is_none() {
                first_seen.push(stop_id);
            }
        }

        if first_seen.is_empty() {
            return Err(DomainError::EmptyTrip(trip_id));
        }

        // Drain in first-seen order so equal times keep a deterministic order
        let mut sorted: Vec<ScheduledArrival> = first_seen
            .iter()
            .filter_map(|id| latest.remove(id))
            .collect();
        sort_by_time(&mut sorted);

        let by_stop = sorted
            .iter()
            .enumerate()
            .map(|(i, a)| (a.stop().id().to_string(), i))
            .collect();

        Ok(Self {
            direction,
            trip_id,
            route,
            availability,
            arrivals: sorted,
            by_stop,
        })
    }

    pub fn direction(&self) -> RouteDirection {
        self.direction
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn availability(&self) -> ServiceAvailability {
        self.availability
    }

    /// Whether the trip runs on the day of the week `date` falls on.
    pub fn available_on(&self, date: NaiveDate) -> bool {
        self.available_on_day(date.weekday())
    }

    /// Whether the trip runs on `weekday`.
    pub fn available_on_day(&self, weekday: Weekday) -> bool {
        self.availability.available_on(weekday)
    }

    /// Time of the earliest arrival.
    pub fn start_time(&self) -> NaiveTime {
        // Non-empty by construction
        self.arrivals[0].time()
    }

    /// All arrivals, ascending by time.
    pub fn stops(&self) -> &[ScheduledArrival] {
        &self.arrivals
    }

    /// Whether the trip serves `stop`.
    pub fn has_stop(&self, stop: &Stop) -> bool {
        self.has_stop_id(stop.id())
    }

    /// Whether the trip serves the stop with id `stop_id`.
    pub fn has_stop_id(&self, stop_id: &str) -> bool {
        self.by_stop.contains_key(stop_id)
    }

    /// Arrival at `stop`, if the trip serves it.
    pub fn arrival_at(&self, stop: &Stop) -> Option<&ScheduledArrival> {
        self.by_stop.get(stop.id()).map(|&i| &self.arrivals[i])
    }

    /// Scheduled arrival time at `stop`, if the trip serves it.
    pub fn arrival_time_at(&self, stop: &Stop) -> Option<NaiveTime> {
        self.arrival_time_at_id(stop.id())
    }

    /// Scheduled arrival time at the stop with id `stop_id`.
    pub fn arrival_time_at_id(&self, stop_id: &str) -> Option<NaiveTime> {
        self.by_stop.get(stop_id).map(|&i| self.arrivals[i].time())
    }

    /// Number of stops served.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    /// Whether the trip serves no stops. Never true for a built trip.
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}

impl fmt::Display for ScheduledTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trip ID: {}", self.trip_id)?;
        writeln!(f, "Start time: {}", self.start_time())?;
        writeln!(f, "{}", self.availability)?;
        writeln!(f, "Direction: {}", self.direction)?;
        writeln!(f, "-----\nRoute Info:\n{}", self.route)?;
        write!(f, "-----\nStop Info:")?;
        for arrival in &self.arrivals {
            write!(f, "\n{arrival}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, VehicleType};

    fn stop(id: &str) -> Arc<Stop> {
        Arc::new(Stop::new(id, format!("Stop {id}"), Location::new(40.44, -79.94).unwrap()))
    }

    fn route() -> Arc<Route> {
        Arc::new(Route::new("61D", "Murray", VehicleType::Bus))
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn arrival(stop_id: &str, time: NaiveTime) -> ScheduledArrival {
        ScheduledArrival::new(stop(stop_id), time, route(), RouteDirection::Inbound)
    }

    fn make_trip(arrivals: Vec<ScheduledArrival>) -> ScheduledTrip {
        ScheduledTrip::new(
            RouteDirection::Inbound,
            "T1",
            route(),
            ServiceAvailability::Weekdays,
            arrivals,
        )
        .unwrap()
    }

    #[test]
    fn stops_are_sorted_and_start_time_is_first() {
        let trip = make_trip(vec![
            arrival("C", hm(10, 30)),
            arrival("A", hm(10, 0)),
            arrival("B", hm(10, 15)),
        ]);

        let ids: Vec<&str> = trip.stops().iter().map(|a| a.stop().id()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(trip.start_time(), hm(10, 0));
        assert_eq!(trip.len(), 3);
    }

    #[test]
    fn duplicate_stop_keeps_last_arrival() {
        let trip = make_trip(vec![
            arrival("A", hm(10, 0)),
            arrival("B", hm(10, 10)),
            arrival("A", hm(10, 20)),
        ]);

        assert_eq!(trip.len(), 2);
        assert_eq!(trip.arrival_time_at_id("A"), Some(hm(10, 20)));
        assert_eq!(trip.start_time(), hm(10, 10));
    }

    #[test]
    fn empty_trip_is_rejected() {
        let err = ScheduledTrip::new(
            RouteDirection::Outbound,
            "EMPTY",
            route(),
            ServiceAvailability::Sunday,
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, DomainError::EmptyTrip("EMPTY".into()));
    }

    #[test]
    fn has_stop_and_arrival_time_agree() {
        let trip = make_trip(vec![arrival("A", hm(8, 0)), arrival("B", hm(8, 5))]);

        assert!(trip.has_stop(&stop("A")));
        assert_eq!(trip.arrival_time_at(&stop("B")), Some(hm(8, 5)));
        assert_eq!(trip.arrival_at(&stop("B")).map(|a| a.time()), Some(hm(8, 5)));

        assert!(!trip.has_stop(&stop("Z")));
        assert_eq!(trip.arrival_time_at(&stop("Z")), None);
        assert!(trip.arrival_at(&stop("Z")).is_none());
    }

    #[test]
    fn availability_by_date_uses_weekday() {
        let trip = make_trip(vec![arrival("A", hm(8, 0))]);
        // 2024-03-15 is a Friday, 2024-03-16 a Saturday
        assert!(trip.available_on(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        assert!(!trip.available_on(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
        assert!(trip.available_on_day(Weekday::Tue));
        assert!(!trip.available_on_day(Weekday::Sun));
    }

    #[test]
    fn display_lists_stops_in_order() {
        let trip = make_trip(vec![arrival("B", hm(9, 5)), arrival("A", hm(9, 0))]);
        let text = trip.to_string();

        assert!(text.starts_with("Trip ID: T1\nStart time: 09:00:00\n"));
        assert!(text.contains("Direction: INBOUND"));
        let a = text.find("Stop Stop A").unwrap();
        let b = text.find("Stop Stop B").unwrap();
        assert!(a < b);
    }
}
