//! Service availability patterns and the schedule validity window.

use std::fmt;

use chrono::{NaiveDate, Weekday};

/// Which days of the week a trip runs, keyed by GTFS `service_id`.
///
/// The schedule publishes a small fixed set of service codes. Numeric and
/// alphabetic codes are aliases for the same weekly pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceAvailability {
    /// "1"
    Sunday,
    /// "2"
    Weekdays,
    /// "3"
    Saturday,
    /// "4"
    None,
    /// "S"
    SundayAlpha,
    /// "W"
    WeekdaysAlpha,
    /// "U"
    SaturdayAlpha,
    /// Anything else
    Unknown,
}

impl ServiceAvailability {
    /// Decode a service code. Unrecognised codes map to `Unknown`.
    pub fn from_service_id(service_id: &str) -> Self {
        match service_id.trim() {
            "1" => ServiceAvailability::Sunday,
            "2" => ServiceAvailability::Weekdays,
            "3" => ServiceAvailability::Saturday,
            "4" => ServiceAvailability::None,
            "S" => ServiceAvailability::SundayAlpha,
            "W" => ServiceAvailability::WeekdaysAlpha,
            "U" => ServiceAvailability::SaturdayAlpha,
            _ => ServiceAvailability::Unknown,
        }
    }

    /// The canonical service code for this pattern.
    pub fn service_id(self) -> &'static str {
        match self {
            ServiceAvailability::Sunday => "1",
            ServiceAvailability::Weekdays => "2",
            ServiceAvailability::Saturday => "3",
            ServiceAvailability::None => "4",
            ServiceAvailability::SundayAlpha => "S",
            ServiceAvailability::WeekdaysAlpha => "W",
            ServiceAvailability::SaturdayAlpha => "U",
            ServiceAvailability::Unknown => "X",
        }
    }

    /// Runs Monday through Friday.
    pub fn available_weekdays(self) -> bool {
        matches!(
            self,
            ServiceAvailability::Weekdays | ServiceAvailability::WeekdaysAlpha
        )
    }

    /// Runs on Saturday.
    pub fn available_saturday(self) -> bool {
        matches!(
            self,
            ServiceAvailability::Saturday | ServiceAvailability::SaturdayAlpha
        )
    }

    /// Runs on Sunday.
    pub fn available_sunday(self) -> bool {
        matches!(
            self,
            ServiceAvailability::Sunday | ServiceAvailability::SundayAlpha
        )
    }

    /// Runs on the given day of the week.
    pub fn available_on(self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Sat => self.available_saturday(),
            Weekday::Sun => self.available_sunday(),
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                self.available_weekdays()
            }
        }
    }
}

impl fmt::Display for ServiceAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<&str> = [
            (self.available_weekdays(), "Weekdays"),
            (self.available_saturday(), "Saturdays"),
            (self.available_sunday(), "Sundays"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();

        if days.is_empty() {
            f.write_str("Not available")
        } else {
            write!(f, "Available on {}", days.join(", "))
        }
    }
}

/// Date range over which a published schedule is valid.
///
/// Every service pattern in one schedule release shares the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    start_date: NaiveDate,
    expiration_date: NaiveDate,
}

impl ValidityWindow {
    /// Create a window. Returns `None` if `expiration_date` precedes `start_date`.
    pub fn new(start_date: NaiveDate, expiration_date: NaiveDate) -> Option<Self> {
        (start_date <= expiration_date).then_some(Self {
            start_date,
            expiration_date,
        })
    }

    /// First day the schedule is valid.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day the schedule is valid.
    pub fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }

    /// Whether `date` falls within the window (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start_date..=self.expiration_date).contains(&date)
    }
}

impl Default for ValidityWindow {
    /// The fall 2023 service release.
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap_or(NaiveDate::MIN),
            expiration_date: NaiveDate::from_ymd_opt(2024, 2, 17).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl fmt::Display for ValidityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date, self.expiration_date)
    }
}
