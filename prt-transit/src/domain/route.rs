//! Transit routes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::cache::{IdentityCache, Identified};

use super::DomainError;

/// The kind of vehicle that serves a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Bus,
    LightRail,
}

impl VehicleType {
    /// Decode a GTFS `route_type` code or a real-time feed name.
    ///
    /// # Examples
    ///
    /// ```
    /// use prt_transit::domain::VehicleType;
    ///
    /// assert_eq!(VehicleType::parse("3").unwrap(), VehicleType::Bus);
    /// assert_eq!(VehicleType::parse("Light Rail").unwrap(), VehicleType::LightRail);
    /// assert!(VehicleType::parse("7").is_err()); // funicular
    /// ```
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim() {
            "3" | "Port Authority Bus" => Ok(VehicleType::Bus),
            "0" | "Light Rail" => Ok(VehicleType::LightRail),
            other => Err(DomainError::InvalidVehicleType(other.to_string())),
        }
    }

    /// The name the real-time feed uses for this vehicle type.
    pub fn feed_name(self) -> &'static str {
        match self {
            VehicleType::Bus => "Port Authority Bus",
            VehicleType::LightRail => "Light Rail",
        }
    }
}

/// A transit route, such as the 61D bus.
///
/// Identity is the route id: two routes with the same id are equal
/// regardless of their other fields. Canonical instances come from the
/// route cache via [`Route::create_from`].
#[derive(Debug, Clone)]
pub struct Route {
    id: String,
    name: String,
    vehicle_type: VehicleType,
}

impl Route {
    /// Build a detached route value. Prefer [`Route::create_from`].
    pub fn new(id: impl Into<String>, name: impl Into<String>, vehicle_type: VehicleType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vehicle_type,
        }
    }

    /// Return the canonical route for `id`, registering a new one if absent.
    ///
    /// When the id is already cached the other arguments are ignored.
    pub fn create_from(
        cache: &IdentityCache<Route>,
        id: &str,
        name: &str,
        vehicle_type: VehicleType,
    ) -> Arc<Route> {
        cache.get_or_insert_with(id, || Route::new(id, name, vehicle_type))
    }

    /// Route id, e.g. "61D".
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}

impl Identified for Route {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.id,
            self.name,
            self.vehicle_type.feed_name()
        )
    }
}
