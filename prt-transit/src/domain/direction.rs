//! Route direction.

use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Which way a trip travels along its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDirection {
    Inbound,
    Outbound,
}

impl RouteDirection {
    /// Decode a GTFS `direction_id` (1 = inbound, 0 = outbound).
    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            1 => Ok(RouteDirection::Inbound),
            0 => Ok(RouteDirection::Outbound),
            other => Err(DomainError::InvalidDirection(other.to_string())),
        }
    }

    /// The GTFS `direction_id` for this direction.
    pub fn code(self) -> u8 {
        match self {
            RouteDirection::Inbound => 1,
            RouteDirection::Outbound => 0,
        }
    }

    /// Upper-case name, as used by the arrival history feed.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteDirection::Inbound => "INBOUND",
            RouteDirection::Outbound => "OUTBOUND",
        }
    }
}

impl FromStr for RouteDirection {
    type Err = DomainError;

    /// Parse "INBOUND"/"OUTBOUND", ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("INBOUND") {
            Ok(RouteDirection::Inbound)
        } else if trimmed.eq_ignore_ascii_case("OUTBOUND") {
            Ok(RouteDirection::Outbound)
        } else {
            Err(DomainError::InvalidDirection(s.to_string()))
        }
    }
}

impl fmt::Display for RouteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code() {
        assert_eq!(RouteDirection::from_code(1), Ok(RouteDirection::Inbound));
        assert_eq!(RouteDirection::from_code(0), Ok(RouteDirection::Outbound));
        assert_eq!(
            RouteDirection::from_code(2),
            Err(DomainError::InvalidDirection("2".into()))
        );
    }

    #[test]
    fn code_matches_from_code() {
        for dir in [RouteDirection::Inbound, RouteDirection::Outbound] {
            assert_eq!(RouteDirection::from_code(dir.code()), Ok(dir));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("INBOUND".parse(), Ok(RouteDirection::Inbound));
        assert_eq!("inbound".parse(), Ok(RouteDirection::Inbound));
        assert_eq!("Outbound".parse(), Ok(RouteDirection::Outbound));
        assert_eq!(" OUTBOUND ".parse(), Ok(RouteDirection::Outbound));
        assert!("north".parse::<RouteDirection>().is_err());
        assert!("".parse::<RouteDirection>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(RouteDirection::Inbound.to_string(), "INBOUND");
        assert_eq!(RouteDirection::Outbound.to_string(), "OUTBOUND");
    }
}
