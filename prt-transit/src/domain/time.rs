//! GTFS stop-time handling.
//!
//! GTFS publishes arrival times as "HH:MM:SS" strings relative to the start
//! of the service day. Trips that run past midnight keep counting upwards, so
//! a bus arriving five seconds after midnight is listed as "24:00:05". This
//! module folds those times back onto a 24-hour clock.

use chrono::NaiveTime;

/// Error returned when parsing an invalid stop-time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Hours in a service day; anything at or above this has rolled past midnight.
const HOURS_PER_DAY: u32 = 24;

/// Parse a GTFS "HH:MM:SS" time, normalising post-midnight hours.
///
/// Hours 24-47 are treated as belonging to the next calendar day and have
/// 24 subtracted. The hour may be written with one or two digits. Seconds
/// may be omitted ("HH:MM") or carry a fraction ("HH:MM:SS.fff").
///
/// # Examples
///
/// ```
/// use prt_transit::domain::parse_gtfs_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_gtfs_time("05:30:00").unwrap(),
///     NaiveTime::from_hms_opt(5, 30, 0).unwrap()
/// );
///
/// // Past midnight
/// assert_eq!(
///     parse_gtfs_time("24:00:05").unwrap(),
///     NaiveTime::from_hms_opt(0, 0, 5).unwrap()
/// );
///
/// // Seconds are optional
/// assert_eq!(
///     parse_gtfs_time("12:00").unwrap(),
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap()
/// );
///
/// assert!(parse_gtfs_time("12:60:00").is_err());
/// assert!(parse_gtfs_time("noon").is_err());
/// ```
pub fn parse_gtfs_time(s: &str) -> Result<NaiveTime, TimeError> {
    let trimmed = s.trim();
    let mut parts = trimmed.split(':');

    let (Some(h), Some(m), sec, None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TimeError::new(s, "expected HH:MM or HH:MM:SS format"));
    };

    if h.is_empty() || h.len() > 2 {
        return Err(TimeError::new(s, "hour must be one or two digits"));
    }
    let mut hour = parse_digits(h).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
    let minute = parse_two_digits(m).ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
    let (second, nano) = match sec {
        Some(sec) => parse_seconds(sec).ok_or_else(|| TimeError::new(s, "invalid second digits"))?,
        None => (0, 0),
    };

    if hour >= HOURS_PER_DAY {
        hour -= HOURS_PER_DAY;
    }

    NaiveTime::from_hms_nano_opt(hour, minute, second, nano)
        .ok_or_else(|| TimeError::new(s, "time out of range"))
}

/// Parse a GTFS time, falling back to midnight when it is malformed.
///
/// A single unreadable stop time should not take a whole trip down with it,
/// so the failure is logged and the arrival is pinned to 00:00:00.
pub fn parse_gtfs_time_or_midnight(s: &str) -> NaiveTime {
    match parse_gtfs_time(s) {
        Ok(time) => time,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable stop time, defaulting to midnight");
            NaiveTime::MIN
        }
    }
}

/// Parse exactly two ASCII digits.
fn parse_two_digits(s: &str) -> Option<u32> {
    if s.len() != 2 {
        return None;
    }
    parse_digits(s)
}

/// Parse "SS" or "SS.fff" into whole seconds and nanoseconds.
fn parse_seconds(s: &str) -> Option<(u32, u32)> {
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    let second = parse_two_digits(whole)?;
    let nano = match fraction {
        Some(f) if !f.is_empty() && f.len() <= 9 => parse_digits(f)? * 10u32.pow(9 - f.len() as u32),
        Some(_) => return None,
        None => 0,
    };
    Some((second, nano))
}

fn parse_digits(s: &str) -> Option<u32> {
    s.chars()
        .try_fold(0u32, |acc, c| Some(acc * 10 + c.to_digit(10)?))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Timelike;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range clock time round-trips through the parser
        #[test]
        fn clock_times_parse_unchanged(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
            let text = format!("{:02}:{:02}:{:02}", h, m, s);
            let parsed = parse_gtfs_time(&text).unwrap();
            prop_assert_eq!(parsed, NaiveTime::from_hms_opt(h, m, s).unwrap());
        }

        /// Post-midnight hours land on the following day's clock
        #[test]
        fn post_midnight_hours_wrap(h in 24u32..48, m in 0u32..60, s in 0u32..60) {
            let text = format!("{:02}:{:02}:{:02}", h, m, s);
            let parsed = parse_gtfs_time(&text).unwrap();
            prop_assert_eq!(parsed.hour(), h - 24);
            prop_assert_eq!(parsed.minute(), m);
            prop_assert_eq!(parsed.second(), s);
        }

        /// Arbitrary input never panics
        #[test]
        fn never_panics(s in ".{0,12}") {
            let _ = parse_gtfs_time_or_midnight(&s);
        }
    }
}
