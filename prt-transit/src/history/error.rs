//! History error types.

use crate::domain::DomainError;

/// Reasons an observed-arrival row could not become a `HistoryEntry`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistoryError {
    /// Route id not present in the route cache
    #[error("invalid or unknown route id: {0}")]
    UnknownRoute(String),

    /// Stop id not present in the stop cache
    #[error("invalid or unknown stop id: {0}")]
    UnknownStop(String),

    /// Timestamp column did not parse
    #[error("invalid {field} timestamp: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    /// Direction or trip id rejected by the domain model
    #[error(transparent)]
    Domain(#[from] DomainError),
}
