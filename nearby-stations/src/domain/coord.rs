//! Geographic coordinates and great-circle distance.

use std::fmt;

/// Earth mean radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Conversion factor from kilometres to statute miles.
pub const KM_TO_MILES: f64 = 0.621371;

/// Error returned when a `"lat,lon"` string cannot be split into two floats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates {input:?}: {reason}")]
pub struct CoordinateError {
    input: String,
    reason: &'static str,
}

/// A WGS84 position in decimal degrees.
///
/// Ranges are not validated: out-of-range values give mathematically
/// defined but meaningless distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse the catalog's `"lat,lon"` representation.
    ///
    /// ```
    /// use nearby_stations::domain::Coordinate;
    ///
    /// let c = Coordinate::parse_pair("40.7359,-73.9911").unwrap();
    /// assert_eq!(c, Coordinate::new(40.7359, -73.9911));
    ///
    /// assert!(Coordinate::parse_pair("40.7359").is_err());
    /// assert!(Coordinate::parse_pair("north,west").is_err());
    /// ```
    pub fn parse_pair(s: &str) -> Result<Self, CoordinateError> {
        let err = |reason| CoordinateError {
            input: s.to_string(),
            reason,
        };

        let (lat, lon) = s.split_once(',').ok_or_else(|| err("expected \"lat,lon\""))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| err("latitude is not a number"))?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| err("longitude is not a number"))?;

        Ok(Self { lat, lon })
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

/// Haversine distance between two points in kilometres.
///
/// Symmetric and non-negative; zero for identical inputs.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` fractionally above 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Convert kilometres to miles rounded to two decimal places.
pub fn km_to_miles_rounded(km: f64) -> f64 {
    (km * KM_TO_MILES * 100.0).round() / 100.0
}
