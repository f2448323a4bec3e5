//! Domain types for the transit schedule and history engine.
//!
//! This module contains the core domain model types built from GTFS and
//! arrival-log data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod arrival;
mod availability;
mod direction;
mod error;
mod history_entry;
mod location;
mod route;
mod stop;
mod time;
mod trip;

pub use arrival::{Arrival, ScheduledArrival, sort_by_time};
pub use availability::{ServiceAvailability, ValidityWindow};
pub use direction::RouteDirection;
pub use error::DomainError;
pub use history_entry::HistoryEntry;
pub use location::{DistanceUnit, Location};
pub use route::{Route, VehicleType};
pub use stop::Stop;
pub use time::{TimeError, parse_gtfs_time, parse_gtfs_time_or_midnight};
pub use trip::ScheduledTrip;
