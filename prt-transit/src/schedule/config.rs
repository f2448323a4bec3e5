//! Configuration for building the schedule index.

use std::collections::HashSet;

use crate::domain::ValidityWindow;

/// Routes left out of the schedule by default: the Monongahela and
/// Duquesne inclines.
const DEFAULT_EXCLUDED_ROUTES: [&str; 2] = ["MI", "DQI"];

/// Configuration parameters for schedule construction.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Route ids whose rows are skipped entirely.
    pub excluded_routes: HashSet<String>,

    /// Date range the loaded schedule release is valid for.
    pub validity: ValidityWindow,
}

impl ScheduleConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(excluded_routes: HashSet<String>, validity: ValidityWindow) -> Self {
        Self {
            excluded_routes,
            validity,
        }
    }

    /// Replace the excluded-route set.
    pub fn with_excluded_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_routes = routes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the validity window.
    pub fn with_validity(mut self, validity: ValidityWindow) -> Self {
        self.validity = validity;
        self
    }

    /// Whether rows for `route_id` should be skipped.
    pub fn is_excluded(&self, route_id: &str) -> bool {
        self.excluded_routes.contains(route_id)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            excluded_routes: DEFAULT_EXCLUDED_ROUTES.iter().map(|r| r.to_string()).collect(),
            validity: ValidityWindow::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn default_config() {
        let config = ScheduleConfig::default();

        assert!(config.is_excluded("MI"));
        assert!(config.is_excluded("DQI"));
        assert!(!config.is_excluded("61D"));
        assert_eq!(config.validity, ValidityWindow::default());
    }

    #[test]
    fn custom_config() {
        let window = ValidityWindow::new(
            NaiveDate::from_ymd_opt(2024, 2, 18).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
        .unwrap();
        let config = ScheduleConfig::default()
            .with_excluded_routes(["28X"])
            .with_validity(window);

        assert!(config.is_excluded("28X"));
        assert!(!config.is_excluded("MI"));
        assert_eq!(config.validity, window);
    }
}
