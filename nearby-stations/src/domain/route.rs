//! Route identifiers, the canonical route list, and travel directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every route the system knows about, in canonical order.
///
/// This is the single source of truth for both data refreshers: the
/// route-stop listing and the timetable refresh iterate it in this order.
pub const CANONICAL_ROUTES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "A", "B", "C", "D", "E", "F", "FS", "G", "GS", "H", "J", "L",
    "M", "N", "Q", "R", "SI", "W", "Z",
];

/// Error returned when parsing an invalid route id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// A route identifier such as `L`, `4` or `SI`.
///
/// # Examples
///
/// ```
/// use nearby_stations::domain::RouteId;
///
/// let l = RouteId::parse("L").unwrap();
/// assert!(l.is_canonical());
///
/// let x = RouteId::parse("X9").unwrap();
/// assert!(!x.is_canonical());
///
/// assert!(RouteId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id. Must be non-empty and free of whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        if s.is_empty() {
            return Err(InvalidRouteId {
                reason: "must not be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidRouteId {
                reason: "must not contain whitespace",
            });
        }
        Ok(Self(s.to_string()))
    }

    /// The canonical route list as typed ids.
    pub fn canonical() -> Vec<RouteId> {
        CANONICAL_ROUTES
            .iter()
            .map(|r| RouteId((*r).to_string()))
            .collect()
    }

    /// Whether this route appears in [`CANONICAL_ROUTES`].
    pub fn is_canonical(&self) -> bool {
        CANONICAL_ROUTES.contains(&self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidRouteId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of travel for a timetable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Both directions, northbound first.
    pub const ALL: [Direction; 2] = [Direction::North, Direction::South];

    /// Parse the single-letter code used in timetables and platform ids.
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
        }
    }

    /// Human-readable label used in the result document.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::North => "North-Bound",
            Direction::South => "South-Bound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
