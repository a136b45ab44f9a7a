//! Station identifiers and catalog records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// An external station identifier, e.g. `101` or `A02N`.
///
/// Ids are opaque keys: they may carry a direction suffix for platform-level
/// records, and nothing in the catalog assumes a shared id scheme between
/// records of the same physical stop.
///
/// # Examples
///
/// ```
/// use nearby_stations::domain::StationId;
///
/// let id = StationId::parse("A02").unwrap();
/// assert_eq!(id.as_str(), "A02");
///
/// // Command-line input is upper-cased first
/// let id = StationId::parse_normalized(" a02 ").unwrap();
/// assert_eq!(id.as_str(), "A02");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("A 02").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id exactly as given.
    ///
    /// The id must be non-empty and must not contain whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStationId {
                reason: "must not contain whitespace",
            });
        }

        Ok(Self(s.to_string()))
    }

    /// Parse a station id from user input: trimmed and upper-cased.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationId> {
        Self::parse(&s.trim().to_uppercase())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id with a trailing `N`/`S` platform direction removed.
    ///
    /// Ids consisting of a single character are returned unchanged.
    pub fn without_direction(&self) -> StationId {
        match self.0.strip_suffix(['N', 'S']) {
            Some(base) if !base.is_empty() => StationId(base.to_string()),
            _ => self.clone(),
        }
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry in the station catalog.
///
/// Several records may share a `name` and nearly identical coordinates when
/// they describe different platforms or entrances of one physical stop.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    pub position: Coordinate,
}

impl StationRecord {
    /// Create a new record.
    pub fn new(id: StationId, name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }

    /// Great-circle distance in kilometres to another record.
    pub fn distance_km(&self, other: &StationRecord) -> f64 {
        self.position.distance_km(&other.position)
    }

    /// Name shown to users: the part before the first `-`, trimmed.
    ///
    /// Catalog names sometimes append a line or borough after a dash
    /// (`"Canal St - Broadway"`); the display name drops it.
    pub fn display_name(&self) -> &str {
        self.name.split('-').next().unwrap_or_default().trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> StationRecord {
        StationRecord::new(
            StationId::parse(id).unwrap(),
            name,
            Coordinate::new(40.7359, -73.9911),
        )
    }

    #[test]
    fn parse_valid_ids() {
        assert!(StationId::parse("101").is_ok());
        assert!(StationId::parse("A02N").is_ok());
        assert!(StationId::parse("H01").is_ok());
    }

    #[test]
    fn reject_empty_and_whitespace() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse(" ").is_err());
        assert!(StationId::parse("1 01").is_err());
        assert!(StationId::parse("101\n").is_err());
    }

    #[test]
    fn parse_normalized_upper_cases_and_trims() {
        let id = StationId::parse_normalized("  r60s ").unwrap();
        assert_eq!(id.as_str(), "R60S");
        assert!(StationId::parse_normalized("   ").is_err());
    }

    #[test]
    fn without_direction_strips_suffix() {
        let id = StationId::parse("101N").unwrap();
        assert_eq!(id.without_direction().as_str(), "101");

        let id = StationId::parse("A02S").unwrap();
        assert_eq!(id.without_direction().as_str(), "A02");

        let id = StationId::parse("101").unwrap();
        assert_eq!(id.without_direction().as_str(), "101");

        // A bare direction letter is not stripped to nothing
        let id = StationId::parse("N").unwrap();
        assert_eq!(id.without_direction().as_str(), "N");
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("250").unwrap();
        assert_eq!(format!("{}", id), "250");
        assert_eq!(format!("{:?}", id), "StationId(250)");
    }

    #[test]
    fn serde_roundtrip_rejects_invalid() {
        let id: StationId = serde_json::from_str("\"101N\"").unwrap();
        assert_eq!(id.as_str(), "101N");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"101N\"");

        assert!(serde_json::from_str::<StationId>("\"\"").is_err());
    }

    #[test]
    fn display_name_drops_suffix_after_dash() {
        assert_eq!(record("1", "Union Sq").display_name(), "Union Sq");
        assert_eq!(
            record("2", "Canal St - Broadway").display_name(),
            "Canal St"
        );
        assert_eq!(record("3", "Av-X").display_name(), "Av");
    }
}
