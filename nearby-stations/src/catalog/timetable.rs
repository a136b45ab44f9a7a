//! Scheduled departures per route, station and direction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, RouteId, StationId};

/// Departure lists for one station on one route.
///
/// Times are kept as the raw `"HH:MM"` strings from the stop listing; the
/// departure aggregation parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationTimes {
    #[serde(rename = "N", default, skip_serializing_if = "Vec::is_empty")]
    pub north: Vec<String>,
    #[serde(rename = "S", default, skip_serializing_if = "Vec::is_empty")]
    pub south: Vec<String>,
}

impl StationTimes {
    pub fn get(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
        }
    }

    pub fn set(&mut self, direction: Direction, times: Vec<String>) {
        match direction {
            Direction::North => self.north = times,
            Direction::South => self.south = times,
        }
    }
}

/// All station timetables for a single route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTimetable {
    pub stations: BTreeMap<StationId, StationTimes>,
}

impl RouteTimetable {
    pub fn station(&self, id: &StationId) -> Option<&StationTimes> {
        self.stations.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Timetables for every route that has been refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    routes: BTreeMap<RouteId, RouteTimetable>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, route: &RouteId) -> Option<&RouteTimetable> {
        self.routes.get(route)
    }

    /// Departure list for a route, station and direction.
    ///
    /// Anything missing along the way is an empty list, never an error.
    pub fn times(&self, route: &RouteId, station: &StationId, direction: Direction) -> &[String] {
        self.routes
            .get(route)
            .and_then(|r| r.station(station))
            .map(|s| s.get(direction))
            .unwrap_or_default()
    }

    pub fn insert(&mut self, route: RouteId, timetable: RouteTimetable) {
        self.routes.insert(route, timetable);
    }

    /// Overwrite the routes present in `other`, keeping all others.
    pub fn merge(&mut self, other: Timetable) {
        self.routes.extend(other.routes);
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteId> {
        self.routes.keys()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
