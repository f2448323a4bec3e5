//! The history table: an immutable, filterable view over observed arrivals.
//!
//! Every filter, sort and truncation hands back a new table sharing the
//! underlying entries, so chains like
//!
//! ```
//! # use prt_transit::history::HistoryTable;
//! # use chrono::Weekday;
//! # let table = HistoryTable::new(Vec::new());
//! let friday_delay = table
//!     .on_day_of_week(Weekday::Fri)
//!     .average_delay();
//! # assert_eq!(friday_delay, chrono::TimeDelta::zero());
//! ```
//!
//! never disturb the table they started from.

use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::Serialize;

use crate::cache::IdentityCache;
use crate::domain::{HistoryEntry, Route, RouteDirection, ScheduledTrip, Stop};

use super::config::HistoryConfig;
use super::row::RawHistoryRow;

/// The full observed-arrival table, loaded at most once per process.
static FULL_TABLE: OnceLock<HistoryTable> = OnceLock::new();

/// Ordered collection of observed arrivals.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    entries: Vec<Arc<HistoryEntry>>,
    created_at: NaiveDateTime,
}

/// Aggregate view of a table, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub entries: usize,
    pub average_delay_secs: i64,
    pub average_deviation_secs: i64,
    pub created_at: NaiveDateTime,
}

impl HistoryTable {
    /// A table over `entries`, stamped with the current local time.
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(Arc::new).collect(),
            created_at: chrono::Local::now().naive_local(),
        }
    }

    /// Resolve raw rows against the caches. Rows that fail are logged and
    /// left out.
    pub fn from_raw_rows<I>(
        rows: I,
        routes: &IdentityCache<Route>,
        stops: &IdentityCache<Stop>,
    ) -> Self
    where
        I: IntoIterator<Item = RawHistoryRow>,
    {
        let mut dropped = 0usize;
        let entries: Vec<HistoryEntry> = rows
            .into_iter()
            .filter_map(|row| match row.resolve(routes, stops) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(trip_id = %row.trip_id, error = %e, "failed to create history entry");
                    dropped += 1;
                    None
                }
            })
            .collect();

        tracing::info!(entries = entries.len(), dropped, "history table loaded");
        Self::new(entries)
    }

    /// Load the process-wide table with `load`, unless it is already loaded.
    ///
    /// `load` runs at most once; later calls return the existing table.
    pub fn load_full_table<F>(load: F) -> &'static HistoryTable
    where
        F: FnOnce() -> HistoryTable,
    {
        FULL_TABLE.get_or_init(load)
    }

    /// The process-wide table, if it has been loaded.
    pub fn full_table() -> Option<&'static HistoryTable> {
        FULL_TABLE.get()
    }

    /// Same snapshot time, different entries.
    fn derive(&self, entries: Vec<Arc<HistoryEntry>>) -> Self {
        Self {
            entries,
            created_at: self.created_at,
        }
    }

    /// When the data in this table was captured. Derived tables keep the
    /// time of the table they came from.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn number_of_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Arc<HistoryEntry>] {
        &self.entries
    }

    /// Entries whose extracted field equals `value`.
    pub fn filter_eq<T, F>(&self, extractor: F, value: T) -> Self
    where
        T: PartialEq,
        F: Fn(&HistoryEntry) -> T,
    {
        self.filter(|entry| extractor(entry) == value)
    }

    /// Entries satisfying `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&HistoryEntry) -> bool,
    {
        self.derive(
            self.entries
                .iter()
                .filter(|entry| predicate(entry))
                .cloned()
                .collect(),
        )
    }

    pub fn of_route(&self, route: &Route) -> Self {
        self.filter(|entry| entry.route().id() == route.id())
    }

    pub fn of_stop(&self, stop: &Stop) -> Self {
        self.filter(|entry| entry.stop().id() == stop.id())
    }

    pub fn in_direction(&self, direction: RouteDirection) -> Self {
        self.filter_eq(HistoryEntry::direction, direction)
    }

    /// Observations of `trip`: same route, at one of its stops, scheduled
    /// within ten minutes of that stop's scheduled arrival.
    pub fn of_trip(&self, trip: &ScheduledTrip) -> Self {
        self.of_trip_within(trip, HistoryConfig::default().trip_match_tolerance)
    }

    /// As [`of_trip`](Self::of_trip) with a caller-chosen tolerance.
    ///
    /// Times are compared as times of day with no wrap at midnight, and the
    /// gap is truncated to whole minutes before comparing.
    pub fn of_trip_within(&self, trip: &ScheduledTrip, tolerance: TimeDelta) -> Self {
        let route_id = trip.route().id();
        let max_minutes = tolerance.num_minutes();

        self.filter(|entry| {
            entry.route().id() == route_id
                && trip
                    .arrival_time_at_id(entry.stop().id())
                    .is_some_and(|scheduled| {
                        let gap = entry.scheduled_time().time() - scheduled;
                        gap.num_minutes().abs() <= max_minutes
                    })
        })
    }

    /// Entries that actually arrived on `date`.
    pub fn on_date(&self, date: NaiveDate) -> Self {
        self.filter_eq(|entry| entry.actual_arrival_time().date(), date)
    }

    /// Entries that actually arrived on `day_of_week`.
    pub fn on_day_of_week(&self, day_of_week: Weekday) -> Self {
        self.filter_eq(|entry| entry.actual_arrival_time().weekday(), day_of_week)
    }

    /// Entries that arrived strictly after `time`.
    pub fn after_date_time(&self, time: NaiveDateTime) -> Self {
        self.filter(|entry| entry.actual_arrival_time() > time)
    }

    /// Entries that arrived strictly before `time`.
    pub fn before_date_time(&self, time: NaiveDateTime) -> Self {
        self.filter(|entry| entry.actual_arrival_time() < time)
    }

    /// Entries that arrived strictly after `time` on whatever day.
    pub fn after_time(&self, time: NaiveTime) -> Self {
        self.filter(|entry| entry.actual_arrival_time().time() > time)
    }

    /// Entries that arrived strictly before `time` on whatever day.
    pub fn before_time(&self, time: NaiveTime) -> Self {
        self.filter(|entry| entry.actual_arrival_time().time() < time)
    }

    /// Mean lateness, early arrivals counting as zero. Zero for an empty
    /// table.
    pub fn average_delay(&self) -> TimeDelta {
        self.average_seconds(|entry| entry.arrival_delay().num_seconds())
    }

    /// Mean signed deviation. Zero for an empty table.
    pub fn average_deviation(&self) -> TimeDelta {
        self.average_seconds(|entry| entry.arrival_deviation().num_seconds())
    }

    fn average_seconds<F>(&self, seconds: F) -> TimeDelta
    where
        F: Fn(&HistoryEntry) -> i64,
    {
        if self.entries.is_empty() {
            return TimeDelta::zero();
        }
        let total: i64 = self.entries.iter().map(|entry| seconds(entry)).sum();
        TimeDelta::seconds(total / self.entries.len() as i64)
    }

    /// A reordered copy. Equal entries keep their relative order.
    pub fn sort_by<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&HistoryEntry, &HistoryEntry) -> Ordering,
    {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| compare(a, b));
        self.derive(entries)
    }

    /// The first `n` entries in current order, or all of them if fewer.
    pub fn top_n_entries(&self, n: usize) -> Vec<Arc<HistoryEntry>> {
        self.entries.iter().take(n).cloned().collect()
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            entries: self.number_of_entries(),
            average_delay_secs: self.average_delay().num_seconds(),
            average_deviation_secs: self.average_deviation().num_seconds(),
            created_at: self.created_at,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Location, VehicleType};
    use proptest::prelude::*;

    fn arb_entry() -> impl Strategy<Value = HistoryEntry> {
        (0usize..3, 0usize..4, any::<bool>(), 0u32..86_400, -1800i64..3600).prop_map(
            |(r, s, inbound, secs, deviation)| {
                let route = Arc::new(Route::new(["61A", "61B", "P1"][r], "r", VehicleType::Bus));
                let stop = Arc::new(Stop::new(format!("S{s}"), "s", Location::new(40.0, -80.0).unwrap()));
                let direction = if inbound {
                    RouteDirection::Inbound
                } else {
                    RouteDirection::Outbound
                };
                let scheduled = NaiveDate::from_ymd_opt(2023, 12, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + TimeDelta::seconds(secs as i64);
                HistoryEntry::new(
                    "T",
                    route,
                    stop,
                    direction,
                    scheduled,
                    scheduled + TimeDelta::seconds(deviation),
                )
                .unwrap()
            },
        )
    }

    fn ids(table: &HistoryTable) -> Vec<*const HistoryEntry> {
        table.entries().iter().map(Arc::as_ptr).collect()
    }

    proptest! {
        /// Applying the same filter twice changes nothing
        #[test]
        fn filters_are_idempotent(entries in prop::collection::vec(arb_entry(), 0..40), s in 0usize..4) {
            let table = HistoryTable::new(entries);
            let probe = Stop::new(format!("S{s}"), "s", Location::new(40.0, -80.0).unwrap());

            let once = table.of_stop(&probe);
            prop_assert_eq!(ids(&once.of_stop(&probe)), ids(&once));

            let once = table.in_direction(RouteDirection::Inbound);
            prop_assert_eq!(ids(&once.in_direction(RouteDirection::Inbound)), ids(&once));

            let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
            let once = table.after_time(noon);
            prop_assert_eq!(ids(&once.after_time(noon)), ids(&once));
        }

        /// Delay never falls below deviation, and never below zero
        #[test]
        fn delay_dominates_deviation(entries in prop::collection::vec(arb_entry(), 0..40)) {
            let table = HistoryTable::new(entries);
            prop_assert!(table.average_delay() >= table.average_deviation());
            prop_assert!(table.average_delay() >= TimeDelta::zero());
        }

        /// top_n never returns more than asked for or more than present
        #[test]
        fn top_n_bounded(entries in prop::collection::vec(arb_entry(), 0..40), n in 0usize..60) {
            let table = HistoryTable::new(entries);
            prop_assert_eq!(table.top_n_entries(n).len(), n.min(table.number_of_entries()));
        }
    }
}
