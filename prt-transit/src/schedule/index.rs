//! The schedule index.
//!
//! Built once from the flattened stop-time rows, then read-only. Rows are
//! grouped by trip id into `ScheduledTrip`s, and each route keeps the list
//! of trips that run on it.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;

use crate::cache::IdentityCache;
use crate::domain::{
    Location, Route, RouteDirection, ScheduledArrival, ScheduledTrip, ServiceAvailability, Stop,
    ValidityWindow,
};

use super::config::ScheduleConfig;
use super::error::ScheduleError;
use super::row::RawScheduleRow;
use super::selector::Selector;

/// Process-wide schedule, installed once at startup.
static GLOBAL_SCHEDULE: OnceLock<Schedule> = OnceLock::new();

/// Counters from a schedule build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    /// Rows consumed.
    pub rows_read: usize,
    /// Rows skipped because their route is excluded.
    pub rows_excluded: usize,
    /// Rows dropped as malformed.
    pub rows_dropped: usize,
    /// Trips materialised.
    pub trips: usize,
}

/// Trip being assembled during a build.
struct PendingTrip {
    trip_id: String,
    route: Arc<Route>,
    direction: RouteDirection,
    availability: ServiceAvailability,
    arrivals: Vec<ScheduledArrival>,
}

/// All scheduled trips, indexed by trip id and by route id.
#[derive(Debug)]
pub struct Schedule {
    /// Trips in first-seen order.
    trips: Vec<Arc<ScheduledTrip>>,
    by_trip_id: HashMap<String, usize>,
    /// Route id -> indices into `trips`.
    by_route: HashMap<String, Vec<usize>>,
    validity: ValidityWindow,
    stats: ScheduleStats,
}

impl Schedule {
    /// Build the index from raw rows.
    ///
    /// Routes must already be in `routes`; an unknown route aborts the build.
    /// Stops are resolved through `stops`, registering any the cache has not
    /// seen. Rows with a bad direction code or unusable coordinates are
    /// logged and dropped.
    pub fn build<I>(
        rows: I,
        routes: &IdentityCache<Route>,
        stops: &IdentityCache<Stop>,
        config: &ScheduleConfig,
    ) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = RawScheduleRow>,
    {
        let mut stats = ScheduleStats::default();
        let mut pending: Vec<PendingTrip> = Vec::new();
        let mut pending_index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            stats.rows_read += 1;

            if config.is_excluded(&row.route_id) {
                stats.rows_excluded += 1;
                continue;
            }

            let idx = match pending_index.get(&row.trip_id) {
                Some(&idx) => idx,
                None => {
                    let route = routes.get(&row.route_id).ok_or_else(|| {
                        ScheduleError::UnknownRoute {
                            route_id: row.route_id.clone(),
                            trip_id: row.trip_id.clone(),
                        }
                    })?;

                    let direction = match RouteDirection::from_code(row.direction_code) {
                        Ok(direction) => direction,
                        Err(e) => {
                            tracing::warn!(trip_id = %row.trip_id, error = %e, "dropping schedule row");
                            stats.rows_dropped += 1;
                            continue;
                        }
                    };

                    pending.push(PendingTrip {
                        trip_id: row.trip_id.clone(),
                        route,
                        direction,
                        availability: ServiceAvailability::from_service_id(&row.service_code),
                        arrivals: Vec::new(),
                    });
                    pending_index.insert(row.trip_id.clone(), pending.len() - 1);
                    pending.len() - 1
                }
            };

            let Some(stop) = resolve_stop(stops, &row) else {
                stats.rows_dropped += 1;
                continue;
            };

            let trip = &mut pending[idx];
            trip.arrivals.push(ScheduledArrival::from_gtfs(
                stop,
                &row.arrival_time,
                Arc::clone(&trip.route),
                trip.direction,
            ));
        }

        let mut trips = Vec::with_capacity(pending.len());
        for p in pending {
            match ScheduledTrip::new(p.direction, p.trip_id, p.route, p.availability, p.arrivals) {
                Ok(trip) => trips.push(trip),
                Err(e) => tracing::warn!(error = %e, "dropping trip"),
            }
        }

        let mut schedule = Self::from_trips(trips, config.validity);
        stats.trips = schedule.len();
        schedule.stats = stats;

        tracing::info!(
            rows = stats.rows_read,
            excluded = stats.rows_excluded,
            dropped = stats.rows_dropped,
            trips = stats.trips,
            "schedule built"
        );

        Ok(schedule)
    }

    /// Index already-built trips. Later trips replace earlier ones with the
    /// same trip id.
    pub fn from_trips(trips: Vec<ScheduledTrip>, validity: ValidityWindow) -> Self {
        let mut schedule = Self {
            trips: Vec::with_capacity(trips.len()),
            by_trip_id: HashMap::with_capacity(trips.len()),
            by_route: HashMap::new(),
            validity,
            stats: ScheduleStats::default(),
        };

        for trip in trips {
            if let Some(&existing) = schedule.by_trip_id.get(trip.trip_id()) {
                tracing::debug!(trip_id = trip.trip_id(), "replacing duplicate trip");
                schedule.trips[existing] = Arc::new(trip);
                continue;
            }
            let idx = schedule.trips.len();
            schedule.by_trip_id.insert(trip.trip_id().to_string(), idx);
            schedule
                .by_route
                .entry(trip.route().id().to_string())
                .or_default()
                .push(idx);
            schedule.trips.push(Arc::new(trip));
        }

        schedule.stats.trips = schedule.trips.len();
        schedule
    }

    /// Install `schedule` as the process-wide schedule.
    ///
    /// Only the first install succeeds.
    pub fn install(schedule: Schedule) -> Result<&'static Schedule, ScheduleError> {
        GLOBAL_SCHEDULE
            .set(schedule)
            .map_err(|_| ScheduleError::AlreadyInstalled)?;
        GLOBAL_SCHEDULE.get().ok_or(ScheduleError::AlreadyInstalled)
    }

    /// The process-wide schedule, if one has been installed.
    pub fn global() -> Option<&'static Schedule> {
        GLOBAL_SCHEDULE.get()
    }

    /// Look up a trip by id.
    pub fn trip(&self, trip_id: &str) -> Option<&Arc<ScheduledTrip>> {
        self.by_trip_id.get(trip_id).map(|&i| &self.trips[i])
    }

    /// Every trip, in the order first seen.
    pub fn trips(&self) -> &[Arc<ScheduledTrip>] {
        &self.trips
    }

    /// Trips indexed under `route_id`, in the order first seen.
    pub fn trips_for_route(&self, route_id: &str) -> Vec<Arc<ScheduledTrip>> {
        self.by_route
            .get(route_id)
            .map(|indices| indices.iter().map(|&i| Arc::clone(&self.trips[i])).collect())
            .unwrap_or_default()
    }

    /// Trip ids indexed under `route_id`.
    pub fn trip_ids_for_route(&self, route_id: &str) -> Vec<&str> {
        self.by_route
            .get(route_id)
            .map(|indices| indices.iter().map(|&i| self.trips[i].trip_id()).collect())
            .unwrap_or_default()
    }

    /// Trips matching `selector`.
    pub fn select(&self, selector: &Selector) -> Vec<Arc<ScheduledTrip>> {
        selector.trips(self)
    }

    /// Distinct routes of every trip that serves `stop`, in first-seen order.
    pub fn routes_thru(&self, stop: &Stop) -> Vec<Arc<Route>> {
        let mut seen = HashSet::new();
        Selector::new()
            .at_stop(stop)
            .trips(self)
            .into_iter()
            .filter(|trip| seen.insert(trip.route().id().to_string()))
            .map(|trip| Arc::clone(trip.route()))
            .collect()
    }

    /// First day the schedule is valid.
    pub fn start_date(&self) -> NaiveDate {
        self.validity.start_date()
    }

    /// Last day the schedule is valid.
    pub fn expiration_date(&self) -> NaiveDate {
        self.validity.expiration_date()
    }

    pub fn validity(&self) -> ValidityWindow {
        self.validity
    }

    /// Counters from the build that produced this schedule.
    pub fn stats(&self) -> ScheduleStats {
        self.stats
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Find or register the stop a row refers to.
///
/// Cached stops are reused as-is; only an unseen stop needs valid
/// coordinates.
fn resolve_stop(stops: &IdentityCache<Stop>, row: &RawScheduleRow) -> Option<Arc<Stop>> {
    if let Some(stop) = stops.get(&row.stop_id) {
        return Some(stop);
    }

    match Location::new(row.stop_lat, row.stop_lon) {
        Ok(location) => Some(Stop::create_from(stops, &row.stop_id, &row.stop_name, location)),
        Err(e) => {
            tracing::warn!(stop_id = %row.stop_id, error = %e, "dropping schedule row");
            None
        }
    }
}
