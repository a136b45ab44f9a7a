//! The result document.
//!
//! A [`NearbyReport`] keeps the resolved station, its departures and the
//! ranked neighbours as ordered sequences. Only [`NearbyReport::document`]
//! projects them into the name-keyed JSON shape, disambiguating repeated
//! display names on the way.

use serde::Serialize;

use crate::catalog::Timetable;
use crate::domain::{ClockTime, RouteId, StationId, StationRecord, km_to_miles_rounded};
use crate::resolve::{NeighbourDedup, RankedNeighbor, Resolver, RouteDepartures, next_departures};
use crate::store::OrderedMap;

/// Key of the departures section.
pub const STATION_KEY: &str = "station_name";

/// Key of the neighbours section.
pub const NEIGHBOURS_KEY: &str = "4_other_closest_stations";

/// Appended to a display name that is already taken.
const DISAMBIGUATION_MARK: char = '\u{a0}';

/// Knobs for building a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    /// How many neighbours to rank.
    pub neighbours: usize,
    /// How neighbours are deduplicated.
    pub dedup: NeighbourDedup,
    /// Upcoming departures kept per direction.
    pub max_departures: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            neighbours: crate::resolve::DEFAULT_NEIGHBOUR_COUNT,
            dedup: NeighbourDedup::default(),
            max_departures: crate::resolve::MAX_DEPARTURES_PER_DIRECTION,
        }
    }
}

/// Everything known about one resolved station.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyReport {
    pub station: StationRecord,
    pub synonym_ids: Vec<StationId>,
    pub routes: Vec<RouteId>,
    pub departures: Vec<RouteDepartures>,
    pub neighbours: Vec<RankedNeighbor>,
}

/// One neighbour in the result document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighbourEntry {
    pub station_id: StationId,
    pub synonymous_station_ids: Vec<StationId>,
    pub routes: Vec<RouteId>,
    pub distance_in_miles: f64,
}

type DirectionTimes = OrderedMap<&'static str, Vec<String>>;

/// The serialisable, name-keyed view of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    #[serde(rename = "station_name")]
    pub station: OrderedMap<String, OrderedMap<RouteId, DirectionTimes>>,
    #[serde(rename = "4_other_closest_stations")]
    pub neighbours: OrderedMap<String, NeighbourEntry>,
}

impl NearbyReport {
    /// Assemble a report for `anchor`.
    ///
    /// `now` is the wall-clock time departures are compared against.
    pub fn build(
        resolver: &Resolver<'_>,
        anchor: &StationRecord,
        timetable: &Timetable,
        now: ClockTime,
        options: &ReportOptions,
    ) -> Self {
        let synonym_ids = resolver.synonyms(anchor);
        let routes = resolver.routes_for(anchor);
        let departures =
            next_departures(timetable, &routes, &synonym_ids, now, options.max_departures);
        let neighbours = resolver.nearest_distinct(anchor, options.neighbours, options.dedup);

        Self {
            station: anchor.clone(),
            synonym_ids,
            routes,
            departures,
            neighbours,
        }
    }

    /// Neighbours keyed by display name, in ranking order.
    ///
    /// A display name already used by a closer neighbour gets a non-breaking
    /// space appended until it is unique.
    pub fn neighbour_entries(&self) -> Vec<(String, NeighbourEntry)> {
        let mut entries: Vec<(String, NeighbourEntry)> = Vec::with_capacity(self.neighbours.len());

        for neighbour in &self.neighbours {
            let mut key = neighbour.record.display_name().to_string();
            while entries.iter().any(|(existing, _)| *existing == key) {
                key.push(DISAMBIGUATION_MARK);
            }

            entries.push((
                key,
                NeighbourEntry {
                    station_id: neighbour.station_id().clone(),
                    synonymous_station_ids: neighbour.synonym_ids.clone(),
                    routes: neighbour.routes.clone(),
                    distance_in_miles: km_to_miles_rounded(neighbour.distance_km),
                },
            ));
        }

        entries
    }

    /// Project into the name-keyed result document.
    pub fn document(&self) -> ReportDocument {
        let routes: OrderedMap<RouteId, DirectionTimes> = self
            .departures
            .iter()
            .map(|dep| {
                let directions = dep
                    .directions
                    .iter()
                    .map(|(direction, times)| {
                        (
                            direction.label(),
                            times.iter().map(ToString::to_string).collect(),
                        )
                    })
                    .collect();
                (dep.route.clone(), directions)
            })
            .collect();

        ReportDocument {
            station: OrderedMap(vec![(self.station.name.clone(), routes)]),
            neighbours: OrderedMap(self.neighbour_entries()),
        }
    }
}
