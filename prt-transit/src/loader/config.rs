//! Where the data files live.

use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "PRT_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_ROUTES_FILE: &str = "routes.txt";
const DEFAULT_STOPS_FILE: &str = "stops.txt";
const DEFAULT_SCHEDULE_FILE: &str = "schedule.txt";
const DEFAULT_HISTORY_FILE: &str = "history.txt";

/// Configuration for the data loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory holding all data files.
    pub data_dir: PathBuf,
    /// GTFS routes file name.
    pub routes_file: String,
    /// GTFS stops file name.
    pub stops_file: String,
    /// Flattened stop-times file name.
    pub schedule_file: String,
    /// Observed arrivals file name.
    pub history_file: String,
}

impl LoaderConfig {
    /// Create a config reading the default file names from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            routes_file: DEFAULT_ROUTES_FILE.to_string(),
            stops_file: DEFAULT_STOPS_FILE.to_string(),
            schedule_file: DEFAULT_SCHEDULE_FILE.to_string(),
            history_file: DEFAULT_HISTORY_FILE.to_string(),
        }
    }

    /// Read the data directory from `PRT_DATA_DIR`, falling back to `data`.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn with_routes_file(mut self, name: impl Into<String>) -> Self {
        self.routes_file = name.into();
        self
    }

    pub fn with_stops_file(mut self, name: impl Into<String>) -> Self {
        self.stops_file = name.into();
        self
    }

    pub fn with_schedule_file(mut self, name: impl Into<String>) -> Self {
        self.schedule_file = name.into();
        self
    }

    pub fn with_history_file(mut self, name: impl Into<String>) -> Self {
        self.history_file = name.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn routes_path(&self) -> PathBuf {
        self.data_dir.join(&self.routes_file)
    }

    pub fn stops_path(&self) -> PathBuf {
        self.data_dir.join(&self.stops_file)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join(&self.schedule_file)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
