//! Observed arrival history and the queries over it.

mod config;
mod error;
mod row;
mod table;

pub use config::HistoryConfig;
pub use error::HistoryError;
pub use row::RawHistoryRow;
pub use table::{HistorySummary, HistoryTable};
