//! Pittsburgh Regional Transit schedule and history queries.
//!
//! Routes and stops live in process-wide identity caches. Scheduled service
//! is indexed once into a [`schedule::Schedule`] and queried with a
//! [`schedule::Selector`]; observed arrivals are held in a
//! [`history::HistoryTable`] that can be filtered, sorted and averaged.

pub mod cache;
pub mod domain;
pub mod history;
pub mod info;
pub mod loader;
pub mod schedule;
