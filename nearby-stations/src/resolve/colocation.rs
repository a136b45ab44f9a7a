//! Co-location: deciding when two records are the same physical stop.
//!
//! Two records are the same stop when they share a name and lie within
//! [`CO_LOCATION_RADIUS_KM`] of each other. The relation is always checked
//! against one anchor and is **not transitive**: `same_stop(a, b)` and
//! `same_stop(b, c)` do not imply `same_stop(a, c)`, because `a` and `c` may
//! be up to twice the radius apart. Callers must not treat it as a global
//! partition of the catalog.

use crate::catalog::{RouteMembership, StationCatalog};
use crate::domain::{Coordinate, RouteId, StationId, StationRecord};

/// Maximum distance between records of one physical stop.
pub const CO_LOCATION_RADIUS_KM: f64 = 0.2;

/// Whether `a` and `b` describe the same physical stop.
pub fn same_stop(a: &StationRecord, b: &StationRecord) -> bool {
    within_group(&a.name, &a.position, b)
}

/// Whether `record` falls in the co-location group anchored at `name`/`position`.
fn within_group(name: &str, position: &Coordinate, record: &StationRecord) -> bool {
    record.name == name && position.distance_km(&record.position) <= CO_LOCATION_RADIUS_KM
}

/// Records co-located with an anchor given by name and position.
///
/// The anchor does not need to be in the catalog: matching is by name and
/// coordinates, never by id.
pub fn co_location_group<'a>(
    catalog: &'a StationCatalog,
    name: &'a str,
    position: Coordinate,
) -> impl Iterator<Item = &'a StationRecord> + 'a {
    catalog
        .named(name)
        .filter(move |record| within_group(name, &position, record))
}

/// Ids of every record that is the same stop as `anchor`, in catalog order.
///
/// Includes the anchor's own id when the anchor is a catalog record.
pub fn synonyms(catalog: &StationCatalog, anchor: &StationRecord) -> Vec<StationId> {
    co_location_group(catalog, &anchor.name, anchor.position)
        .map(|r| r.id.clone())
        .collect()
}

/// Routes serving the stop identified by `name` and `position`.
///
/// Route membership lists may use platform-level ids that differ from the
/// catalog's canonical record, so the lookup goes through the co-location
/// group instead of the anchor's id.
pub fn routes_for_station(
    catalog: &StationCatalog,
    membership: &RouteMembership,
    name: &str,
    position: Coordinate,
) -> Vec<RouteId> {
    let ids: Vec<StationId> = co_location_group(catalog, name, position)
        .map(|r| r.id.clone())
        .collect();
    membership.routes_serving(&ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(StationId::parse(id).unwrap(), name, Coordinate::new(lat, lon))
    }

    fn ids(v: &[&str]) -> Vec<StationId> {
        v.iter().map(|s| StationId::parse(s).unwrap()).collect()
    }

    fn route(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    fn union_sq_catalog() -> StationCatalog {
        StationCatalog::new(vec![
            record("101", "Union Sq", 40.7359, -73.9911),
            record("101N", "Union Sq", 40.73591, -73.99109),
            record("250", "Grand Central", 40.7527, -73.9772),
            // Same name, far away: a different physical stop
            record("900", "Union Sq", 40.80, -73.95),
        ])
        .unwrap()
    }

    #[test]
    fn same_stop_requires_name_and_distance() {
        let a = record("1", "Main St", 40.0, -73.0);
        let near_same_name = record("2", "Main St", 40.0005, -73.0);
        let near_other_name = record("3", "Main Street", 40.0005, -73.0);
        let far_same_name = record("4", "Main St", 40.01, -73.0);

        assert!(same_stop(&a, &a));
        assert!(same_stop(&a, &near_same_name));
        assert!(!same_stop(&a, &near_other_name));
        assert!(!same_stop(&a, &far_same_name));
    }

    #[test]
    fn same_stop_is_not_transitive() {
        // Roughly 0.15 km apart in a chain
        let a = record("A", "Long Platform", 40.0, -73.0);
        let b = record("B", "Long Platform", 40.00135, -73.0);
        let c = record("C", "Long Platform", 40.0027, -73.0);

        assert!(same_stop(&a, &b));
        assert!(same_stop(&b, &c));
        assert!(!same_stop(&a, &c));
    }

    #[test]
    fn synonyms_include_anchor_and_platforms() {
        let catalog = union_sq_catalog();
        let anchor = catalog.get(&StationId::parse("101").unwrap()).unwrap();

        assert_eq!(synonyms(&catalog, anchor), ids(&["101", "101N"]));
    }

    #[test]
    fn synonyms_of_synthetic_anchor() {
        let catalog = union_sq_catalog();
        let anchor = record("SYNTH", "Union Sq", 40.7359, -73.9911);

        assert_eq!(synonyms(&catalog, &anchor), ids(&["101", "101N"]));
    }

    #[test]
    fn routes_via_platform_ids() {
        let catalog = union_sq_catalog();
        let membership: RouteMembership = [
            (route("L"), ids(&["101N"])),
            (route("4"), ids(&["250"])),
            (route("Q"), ids(&["900"])),
        ]
        .into_iter()
        .collect();

        let routes = routes_for_station(
            &catalog,
            &membership,
            "Union Sq",
            Coordinate::new(40.7359, -73.9911),
        );
        assert_eq!(routes, vec![route("L")]);
    }

    #[test]
    fn routes_empty_when_unreferenced() {
        let catalog = union_sq_catalog();
        let membership: RouteMembership = [(route("4"), ids(&["250"]))].into_iter().collect();

        let routes = routes_for_station(
            &catalog,
            &membership,
            "Union Sq",
            Coordinate::new(40.7359, -73.9911),
        );
        assert!(routes.is_empty());
    }
}
