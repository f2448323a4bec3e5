//! Geographic coordinates and great-circle distance.

use std::fmt;

use geo::{HaversineDistance, Point};

use super::DomainError;

/// A unit of distance, expressed in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Meters,
    Feet,
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// How many meters make up one of this unit.
    pub fn meters(self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Feet => 0.3048,
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Miles => 1609.344,
        }
    }
}

/// A point on the earth's surface.
///
/// Latitude and longitude are in decimal degrees. Construction rejects
/// non-finite or out-of-range coordinates, so every `Location` can be
/// measured against every other.
///
/// # Examples
///
/// ```
/// use prt_transit::domain::Location;
///
/// let cmu = Location::new(40.4434, -79.9429).unwrap();
/// let downtown = Location::new(40.4406, -79.9959).unwrap();
/// let km = cmu.kilometers_from(&downtown);
/// assert!(km > 4.0 && km < 5.0);
///
/// assert!(Location::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Create a location, validating the coordinate ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(DomainError::InvalidLocation {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn meters_from(&self, other: &Location) -> f64 {
        self.point().haversine_distance(&other.point())
    }

    fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Distance to `other` in the given unit.
    pub fn distance_from(&self, other: &Location, unit: DistanceUnit) -> f64 {
        self.meters_from(other) / unit.meters()
    }

    /// Distance to `other` in feet.
    pub fn feet_from(&self, other: &Location) -> f64 {
        self.distance_from(other, DistanceUnit::Feet)
    }

    /// Distance to `other` in kilometers.
    pub fn kilometers_from(&self, other: &Location) -> f64 {
        self.distance_from(other, DistanceUnit::Kilometers)
    }

    /// Distance to `other` in miles.
    pub fn miles_from(&self, other: &Location) -> f64 {
        self.distance_from(other, DistanceUnit::Miles)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
