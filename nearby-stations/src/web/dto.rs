//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RouteId, StationId};
use crate::report::{NearbyReport, ReportDocument};

/// Query string of `GET /nearby`.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lon: f64,
}

impl NearbyRequest {
    /// The requested position, if it is a real one.
    pub fn position(&self) -> Option<Coordinate> {
        let valid = self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon);
        valid.then(|| Coordinate::new(self.lat, self.lon))
    }
}

/// JSON answer for a resolved station.
///
/// The `station_name` and `4_other_closest_stations` sections have the
/// same shape as the result document written by the command line.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    /// Id of the resolved record
    pub station_id: StationId,

    /// Ids of every record at the same stop
    pub synonymous_station_ids: Vec<StationId>,

    /// Routes serving the stop
    pub routes: Vec<RouteId>,

    #[serde(flatten)]
    pub document: ReportDocument,
}

impl From<&NearbyReport> for NearbyResponse {
    fn from(report: &NearbyReport) -> Self {
        Self {
            station_id: report.station.id.clone(),
            synonymous_station_ids: report.synonym_ids.clone(),
            routes: report.routes.clone(),
            document: report.document(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
