//! Resolving a query to a single station record.

use crate::catalog::StationCatalog;
use crate::domain::{Coordinate, StationId, StationRecord};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Nearest station to a position
    Position(Coordinate),
    /// A specific station id
    Id(StationId),
}

/// Errors from station resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// No catalog record has the requested id
    #[error("station {0} not found")]
    NotFound(StationId),

    /// The catalog has no records to choose from
    #[error("station catalog is empty")]
    EmptyCatalog,
}

/// The record closest to `position`.
///
/// Linear scan over the whole catalog. Ties go to the record that appears
/// first in catalog order. Returns `None` only for an empty catalog.
pub fn nearest_to(catalog: &StationCatalog, position: Coordinate) -> Option<&StationRecord> {
    let mut best: Option<(&StationRecord, f64)> = None;

    for record in catalog.iter() {
        let dist = position.distance_km(&record.position);
        // Strict comparison keeps the earliest record on ties
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((record, dist));
        }
    }

    best.map(|(record, _)| record)
}

/// The record with exactly this id.
pub fn by_id<'a>(
    catalog: &'a StationCatalog,
    id: &StationId,
) -> Result<&'a StationRecord, ResolveError> {
    catalog
        .get(id)
        .ok_or_else(|| ResolveError::NotFound(id.clone()))
}

/// Resolve either kind of query.
pub fn resolve<'a>(
    catalog: &'a StationCatalog,
    query: &Query,
) -> Result<&'a StationRecord, ResolveError> {
    match query {
        Query::Position(position) => {
            nearest_to(catalog, *position).ok_or(ResolveError::EmptyCatalog)
        }
        Query::Id(id) => by_id(catalog, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(StationId::parse(id).unwrap(), name, Coordinate::new(lat, lon))
    }

    fn catalog() -> StationCatalog {
        StationCatalog::new(vec![
            record("101", "Union Sq", 40.7359, -73.9911),
            record("101N", "Union Sq", 40.73591, -73.99109),
            record("250", "Grand Central", 40.7527, -73.9772),
        ])
        .unwrap()
    }

    #[test]
    fn nearest_by_position() {
        let c = catalog();
        let found = nearest_to(&c, Coordinate::new(40.752, -73.978)).unwrap();
        assert_eq!(found.id.as_str(), "250");
    }

    #[test]
    fn exact_position_returns_that_record() {
        let c = catalog();
        let found = nearest_to(&c, Coordinate::new(40.73591, -73.99109)).unwrap();
        assert_eq!(found.id.as_str(), "101N");
    }

    #[test]
    fn tie_goes_to_first_in_catalog_order() {
        let c = StationCatalog::new(vec![
            record("B", "Second Name", 40.0, -73.0),
            record("A", "First Name", 40.0, -73.0),
        ])
        .unwrap();

        let found = nearest_to(&c, Coordinate::new(40.1, -73.0)).unwrap();
        assert_eq!(found.id.as_str(), "B");
    }

    #[test]
    fn empty_catalog_has_no_nearest() {
        let c = StationCatalog::default();
        assert!(nearest_to(&c, Coordinate::new(0.0, 0.0)).is_none());
        assert_eq!(
            resolve(&c, &Query::Position(Coordinate::new(0.0, 0.0))),
            Err(ResolveError::EmptyCatalog)
        );
    }

    #[test]
    fn by_id_found_and_not_found() {
        let c = catalog();
        let found = by_id(&c, &StationId::parse_normalized("101n").unwrap()).unwrap();
        assert_eq!(found.id.as_str(), "101N");

        let missing = StationId::parse("999").unwrap();
        let err = by_id(&c, &missing).unwrap_err();
        assert_eq!(err, ResolveError::NotFound(missing));
        assert_eq!(err.to_string(), "station 999 not found");
    }

    #[test]
    fn resolve_dispatches_on_query() {
        let c = catalog();
        let q = Query::Id(StationId::parse("250").unwrap());
        assert_eq!(resolve(&c, &q).unwrap().name, "Grand Central");

        let q = Query::Position(Coordinate::new(40.7359, -73.9911));
        assert_eq!(resolve(&c, &q).unwrap().id.as_str(), "101");
    }
}
