//! Scheduled service: the trip index and the query builder over it.

mod config;
mod error;
mod index;
mod row;
mod selector;

pub use config::ScheduleConfig;
pub use error::{ScheduleError, SelectorError};
pub use index::{Schedule, ScheduleStats};
pub use row::RawScheduleRow;
pub use selector::{Selector, arrival_times_for};
