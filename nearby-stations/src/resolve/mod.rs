//! Station resolution and route correlation.
//!
//! This is the core of the crate. Given a position or a station id it picks
//! one station record, reconciles the other records that describe the same
//! physical stop, finds the routes serving it, ranks nearby distinct stops
//! and aggregates upcoming departures. Everything here is synchronous and
//! pure over the loaded catalog, membership index and timetable.

mod colocation;
mod departures;
mod nearest;
mod rank;

pub use colocation::{
    CO_LOCATION_RADIUS_KM, co_location_group, routes_for_station, same_stop, synonyms,
};
pub use departures::{MAX_DEPARTURES_PER_DIRECTION, RouteDepartures, next_departures};
pub use nearest::{Query, ResolveError, by_id, nearest_to, resolve};
pub use rank::{DEFAULT_NEIGHBOUR_COUNT, NeighbourDedup, RankedNeighbor, nearest_distinct};

use crate::catalog::{RouteMembership, StationCatalog};
use crate::domain::{RouteId, StationId, StationRecord};

/// Query facade over a loaded catalog and membership index.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a StationCatalog,
    membership: &'a RouteMembership,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a StationCatalog, membership: &'a RouteMembership) -> Self {
        Self {
            catalog,
            membership,
        }
    }

    /// Resolve a query to exactly one record.
    pub fn resolve(&self, query: &Query) -> Result<&'a StationRecord, ResolveError> {
        resolve(self.catalog, query)
    }

    /// Ids of every record that is the same stop as `anchor`.
    pub fn synonyms(&self, anchor: &StationRecord) -> Vec<StationId> {
        synonyms(self.catalog, anchor)
    }

    /// Routes serving the stop `anchor` belongs to.
    pub fn routes_for(&self, anchor: &StationRecord) -> Vec<RouteId> {
        routes_for_station(self.catalog, self.membership, &anchor.name, anchor.position)
    }

    /// The `k` nearest stops other than the anchor's own.
    pub fn nearest_distinct(
        &self,
        anchor: &StationRecord,
        k: usize,
        dedup: NeighbourDedup,
    ) -> Vec<RankedNeighbor> {
        nearest_distinct(self.catalog, self.membership, anchor, k, dedup)
    }

    pub fn catalog(&self) -> &'a StationCatalog {
        self.catalog
    }

    pub fn membership(&self) -> &'a RouteMembership {
        self.membership
    }
}
