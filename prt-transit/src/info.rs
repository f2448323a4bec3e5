//! Network-wide lookups over the identity caches and the schedule.
//!
//! ```
//! use prt_transit::cache::IdentityCache;
//! use prt_transit::domain::{Location, Stop};
//! use prt_transit::info;
//!
//! let stops = IdentityCache::new();
//! stops.put(Stop::new("7117", "Forbes + Morewood", Location::new(40.4443, -79.9436)?));
//!
//! let here = Location::new(40.4440, -79.9430)?;
//! let nearest = info::closest_stop(&stops, here).unwrap();
//! assert_eq!(nearest.id(), "7117");
//! # Ok::<(), prt_transit::domain::DomainError>(())
//! ```

use std::sync::Arc;

use crate::cache::IdentityCache;
use crate::domain::{Location, Route, Stop};
use crate::schedule::Schedule;

/// The stop nearest to `location`, or `None` if no stops are known.
///
/// Ties go to the stop with the smaller id.
pub fn closest_stop(stops: &IdentityCache<Stop>, location: Location) -> Option<Arc<Stop>> {
    let mut closest: Option<(f64, Arc<Stop>)> = None;
    for stop in stops.all() {
        let distance = location.meters_from(&stop.location());
        if closest.as_ref().is_none_or(|(best, _)| distance < *best) {
            closest = Some((distance, stop));
        }
    }
    closest.map(|(_, stop)| stop)
}

/// Stops strictly closer than `feet` to `location`, ordered by id.
pub fn stops_near(stops: &IdentityCache<Stop>, location: Location, feet: f64) -> Vec<Arc<Stop>> {
    stops
        .all()
        .into_iter()
        .filter(|stop| location.feet_from(&stop.location()) < feet)
        .collect()
}

/// Every known route, ordered by id.
pub fn all_routes(routes: &IdentityCache<Route>) -> Vec<Arc<Route>> {
    routes.all()
}

/// Every known stop, ordered by id.
pub fn all_stops(stops: &IdentityCache<Stop>) -> Vec<Arc<Stop>> {
    stops.all()
}

pub fn route_of(routes: &IdentityCache<Route>, route_id: &str) -> Option<Arc<Route>> {
    routes.get(route_id)
}

/// Routes with at least one scheduled trip serving `stop`.
pub fn routes_thru(schedule: &Schedule, stop: &Stop) -> Vec<Arc<Route>> {
    schedule.routes_thru(stop)
}
