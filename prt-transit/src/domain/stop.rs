//! Transit stops.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::cache::{IdentityCache, Identified};

use super::Location;

/// A place where vehicles pick up and drop off passengers.
///
/// Identity is the stop id. Canonical instances come from the stop cache
/// via [`Stop::create_from`].
#[derive(Debug, Clone)]
pub struct Stop {
    id: String,
    name: String,
    location: Location,
}

impl Stop {
    /// Build a detached stop value. Prefer [`Stop::create_from`].
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }

    /// Return the canonical stop for `id`, registering a new one if absent.
    pub fn create_from(
        cache: &IdentityCache<Stop>,
        id: &str,
        name: &str,
        location: Location,
    ) -> Arc<Stop> {
        cache.get_or_insert_with(id, || Stop::new(id, name, location))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl Identified for Stop {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stop {}, location: {}", self.name, self.location)
    }
}
