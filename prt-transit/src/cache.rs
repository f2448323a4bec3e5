//! Identity caches for routes and stops.
//!
//! Every route and stop id maps to exactly one canonical, immutable entity
//! for the lifetime of the process. Construction paths go through the cache
//! first, so two lookups of "stop 7117" always hand back the same shared
//! value.
//!
//! The store is an unbounded `moka` cache with no expiry: entries are never
//! evicted, and moka's entry API gives atomic create-if-absent when several
//! threads race to register the same id.

use std::sync::{Arc, LazyLock};

use moka::sync::Cache as MokaCache;

use crate::domain::{Route, Stop};

/// An entity with a stable textual identity.
pub trait Identified {
    /// The id that determines this entity's identity.
    fn id(&self) -> &str;
}

/// Process-wide route registry.
static ROUTES: LazyLock<IdentityCache<Route>> = LazyLock::new(IdentityCache::new);

/// Process-wide stop registry.
static STOPS: LazyLock<IdentityCache<Stop>> = LazyLock::new(IdentityCache::new);

/// The shared route cache.
pub fn route_cache() -> &'static IdentityCache<Route> {
    &ROUTES
}

/// The shared stop cache.
pub fn stop_cache() -> &'static IdentityCache<Stop> {
    &STOPS
}

/// Id → canonical entity map with first-writer-wins semantics.
///
/// There is no removal: once an id is registered its entity lives as long
/// as the cache does.
pub struct IdentityCache<T> {
    entries: MokaCache<String, Arc<T>>,
}

impl<T> IdentityCache<T>
where
    T: Identified + Send + Sync + 'static,
{
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: MokaCache::builder().build(),
        }
    }

    /// Look up the canonical entity for `id`.
    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.entries.get(id)
    }

    /// Whether `id` has been registered.
    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Register an entity.
    ///
    /// Returns `false` and leaves the cache unchanged if the id is already
    /// present.
    pub fn put(&self, entity: T) -> bool {
        let key = entity.id().to_string();
        self.entries
            .entry(key)
            .or_insert_with(|| Arc::new(entity))
            .is_fresh()
    }

    /// Return the entity for `id`, building and registering it if absent.
    ///
    /// `make` only runs when the id is not yet cached. If two callers race,
    /// exactly one entity wins and both receive it.
    pub fn get_or_insert_with(&self, id: &str, make: impl FnOnce() -> T) -> Arc<T> {
        if let Some(existing) = self.entries.get(id) {
            return existing;
        }
        self.entries
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(make()))
            .into_value()
    }

    /// Snapshot of every registered entity, ordered by id.
    pub fn all(&self) -> Vec<Arc<T>> {
        let mut all: Vec<Arc<T>> = self.entries.iter().map(|(_, v)| v).collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entries.iter().count()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().next().is_none()
    }
}

impl<T> Default for IdentityCache<T>
where
    T: Identified + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for IdentityCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCache").finish_non_exhaustive()
    }
}
