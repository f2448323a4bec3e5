//! Domain error types.
//!
//! These errors represent validation failures when building domain values
//! from raw feed data. They are distinct from loading/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Direction code or name not recognised
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// Vehicle type code or feed name not recognised
    #[error("invalid vehicle type: {0}")]
    InvalidVehicleType(String),

    /// Coordinates not finite or outside the valid range
    #[error("invalid location ({latitude}, {longitude})")]
    InvalidLocation { latitude: f64, longitude: f64 },

    /// Trip id missing or whitespace only
    #[error("trip id must not be blank")]
    BlankTripId,

    /// Trip built without any arrivals
    #[error("trip {0} has no scheduled arrivals")]
    EmptyTrip(String),
}
