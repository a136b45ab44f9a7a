//! File-backed data sources and the result sink.
//!
//! Layout under the data directory:
//!
//! - `stations.json`: `{ id: { "stop_name": ..., "stop_coordinates": "lat,lon" } }`
//! - `route_stops.json`: `{ route: [station_id, ...] }`
//! - `times.json`: `{ route: { station_id: { "N": [...], "S": [...] } } }`
//!
//! The result document is written to its own path, outside the data
//! directory by default.

mod error;
mod ordered;

pub use error::StoreError;
pub use ordered::OrderedMap;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{RouteMembership, StationCatalog, Timetable};
use crate::domain::{Coordinate, RouteId, StationId, StationRecord};

const STATIONS_FILE: &str = "stations.json";
const ROUTE_STOPS_FILE: &str = "route_stops.json";
const TIMES_FILE: &str = "times.json";

/// One entry of `stations.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationEntry {
    pub stop_name: String,
    pub stop_coordinates: String,
}

/// Where the store reads and writes.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the catalog, membership and timetable files.
    pub data_dir: PathBuf,
    /// Path of the result document.
    pub results_path: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            results_path: PathBuf::from("results.json"),
        }
    }

    /// Set a custom result document path.
    pub fn with_results_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_path = path.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("data")
    }
}

/// Reads the data files and writes refreshed data and results.
#[derive(Debug, Clone)]
pub struct DataStore {
    config: StoreConfig,
}

impl DataStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn stations_path(&self) -> PathBuf {
        self.config.data_dir.join(STATIONS_FILE)
    }

    pub fn route_stops_path(&self) -> PathBuf {
        self.config.data_dir.join(ROUTE_STOPS_FILE)
    }

    pub fn times_path(&self) -> PathBuf {
        self.config.data_dir.join(TIMES_FILE)
    }

    pub fn results_path(&self) -> &Path {
        &self.config.results_path
    }

    /// Load the station catalog, keeping file order.
    pub fn load_catalog(&self) -> Result<StationCatalog, StoreError> {
        let entries: OrderedMap<String, StationEntry> = read_json(&self.stations_path())?;
        let records = entries
            .into_inner()
            .into_iter()
            .map(|(id, entry)| station_record(id, entry))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(stations = records.len(), "loaded station catalog");
        Ok(StationCatalog::new(records)?)
    }

    /// Load route membership, keeping file order.
    pub fn load_route_membership(&self) -> Result<RouteMembership, StoreError> {
        let entries: OrderedMap<RouteId, Vec<StationId>> = read_json(&self.route_stops_path())?;
        let membership: RouteMembership = entries.into_inner().into_iter().collect();

        debug!(routes = membership.len(), "loaded route membership");
        Ok(membership)
    }

    pub fn save_route_membership(&self, membership: &RouteMembership) -> Result<(), StoreError> {
        let entries: OrderedMap<&RouteId, &[StationId]> = membership.iter().collect();
        write_json(&self.route_stops_path(), &entries, b"   ")
    }

    /// Load the timetable. A missing file is an empty timetable.
    pub fn load_timetable(&self) -> Result<Timetable, StoreError> {
        let path = self.times_path();
        if !path.exists() {
            debug!(path = %path.display(), "no timetable file yet");
            return Ok(Timetable::new());
        }
        read_json(&path)
    }

    pub fn save_timetable(&self, timetable: &Timetable) -> Result<(), StoreError> {
        write_json(&self.times_path(), timetable, b"   ")
    }

    /// Merge freshly fetched routes into the stored timetable and save it.
    ///
    /// Returns the merged timetable.
    pub fn merge_timetable(&self, fresh: Timetable) -> Result<Timetable, StoreError> {
        let mut timetable = self.load_timetable()?;
        timetable.merge(fresh);
        self.save_timetable(&timetable)?;
        Ok(timetable)
    }

    /// Write the result document.
    pub fn write_report<T: Serialize>(&self, report: &T) -> Result<(), StoreError> {
        write_json(&self.config.results_path, report, b"    ")
    }
}

fn station_record(id: String, entry: StationEntry) -> Result<StationRecord, StoreError> {
    let station_id = StationId::parse(&id).map_err(|e| StoreError::Station {
        id: id.clone(),
        message: e.to_string(),
    })?;
    let position =
        Coordinate::parse_pair(&entry.stop_coordinates).map_err(|e| StoreError::Station {
            id,
            message: e.to_string(),
        })?;
    Ok(StationRecord::new(station_id, entry.stop_name, position))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `value` as pretty JSON with the given indent.
///
/// Creates parent directories if they don't exist.
fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    indent: &[u8],
) -> Result<(), StoreError> {
    let io_err = |e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| StoreError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;

    std::fs::write(path, buf).map_err(io_err)
}
