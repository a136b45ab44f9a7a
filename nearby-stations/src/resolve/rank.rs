//! Ranking the nearest distinct stops around an anchor.

use crate::catalog::{RouteMembership, StationCatalog};
use crate::domain::{RouteId, StationId, StationRecord};

use super::colocation::{routes_for_station, same_stop, synonyms};

/// How many neighbours are reported by default.
pub const DEFAULT_NEIGHBOUR_COUNT: usize = 12;

/// How accepted neighbours are deduplicated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighbourDedup {
    /// Only drop records that are the same stop as the anchor. Two accepted
    /// neighbours may still be platforms of one stop.
    #[default]
    AnchorOnly,
    /// Additionally drop a candidate that is the same stop as any
    /// neighbour already accepted.
    Mutual,
}

/// One nearby stop in a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNeighbor {
    /// The record that represents this stop in the ranking.
    pub record: StationRecord,
    /// Ids of all records that are the same stop as `record`.
    pub synonym_ids: Vec<StationId>,
    /// Routes serving this stop.
    pub routes: Vec<RouteId>,
    /// Distance from the anchor in kilometres.
    pub distance_km: f64,
}

impl RankedNeighbor {
    pub fn station_id(&self) -> &StationId {
        &self.record.id
    }

    pub fn canonical_name(&self) -> &str {
        &self.record.name
    }
}

/// The `k` nearest stops to `anchor` that are not the anchor's own stop.
///
/// Records are ordered by distance to the anchor with a stable sort, so
/// equidistant records keep catalog order. The anchor and everything
/// co-located with it are skipped. The result is ascending by distance.
pub fn nearest_distinct(
    catalog: &StationCatalog,
    membership: &RouteMembership,
    anchor: &StationRecord,
    k: usize,
    dedup: NeighbourDedup,
) -> Vec<RankedNeighbor> {
    let mut by_distance: Vec<(f64, &StationRecord)> = catalog
        .iter()
        .map(|record| (anchor.distance_km(record), record))
        .collect();
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut accepted: Vec<(f64, &StationRecord)> = Vec::with_capacity(k);

    for (distance, record) in by_distance {
        if accepted.len() >= k {
            break;
        }
        if record == anchor || same_stop(anchor, record) {
            continue;
        }
        if dedup == NeighbourDedup::Mutual
            && accepted.iter().any(|(_, seen)| same_stop(seen, record))
        {
            continue;
        }
        accepted.push((distance, record));
    }

    accepted
        .into_iter()
        .map(|(distance_km, record)| RankedNeighbor {
            synonym_ids: synonyms(catalog, record),
            routes: routes_for_station(catalog, membership, &record.name, record.position),
            record: record.clone(),
            distance_km,
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinate;
    use proptest::prelude::*;

    /// Small catalogs with few distinct names so co-located platforms occur.
    fn catalog_strategy() -> impl Strategy<Value = StationCatalog> {
        prop::collection::vec((40.70f64..40.72, -74.01f64..-73.99, 0usize..4), 1..30).prop_map(
            |points| {
                let records = points
                    .into_iter()
                    .enumerate()
                    .map(|(i, (lat, lon, name))| {
                        StationRecord::new(
                            StationId::parse(&format!("S{i}")).unwrap(),
                            format!("Stop {name}"),
                            Coordinate::new(lat, lon),
                        )
                    })
                    .collect();
                StationCatalog::new(records).unwrap()
            },
        )
    }

    proptest! {
        /// Never includes the anchor's own stop; length and order are as promised
        #[test]
        fn excludes_anchor_group(
            catalog in catalog_strategy(),
            pick in any::<prop::sample::Index>(),
            k in 0usize..40,
        ) {
            let anchor = catalog.records()[pick.index(catalog.len())].clone();
            let group = synonyms(&catalog, &anchor);

            let ranked = nearest_distinct(
                &catalog,
                &RouteMembership::new(),
                &anchor,
                k,
                NeighbourDedup::AnchorOnly,
            );

            prop_assert_eq!(ranked.len(), k.min(catalog.len() - group.len()));
            for n in &ranked {
                prop_assert!(n.record != anchor);
                prop_assert!(!group.contains(n.station_id()));
            }
            for w in ranked.windows(2) {
                prop_assert!(w[0].distance_km <= w[1].distance_km);
            }
        }
    }
}
