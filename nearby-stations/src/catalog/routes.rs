//! Route membership: which station ids each route serves.

use std::collections::HashMap;

use crate::domain::{RouteId, StationId};

/// Mapping from route to the station ids it serves.
///
/// Routes keep the order they were inserted in; reverse lookups report
/// routes in that order. Station ids need not exist in the catalog: a
/// dangling id simply never matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMembership {
    routes: Vec<(RouteId, Vec<StationId>)>,
    index: HashMap<RouteId, usize>,
}

impl RouteMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stations served by `route`.
    ///
    /// Replacing an existing route keeps its original position.
    pub fn insert(&mut self, route: RouteId, stations: Vec<StationId>) {
        match self.index.get(&route) {
            Some(&idx) => self.routes[idx].1 = stations,
            None => {
                self.index.insert(route.clone(), self.routes.len());
                self.routes.push((route, stations));
            }
        }
    }

    /// Stations served by a route; empty for an unknown route.
    pub fn stations_on(&self, route: &RouteId) -> &[StationId] {
        self.index
            .get(route)
            .map(|&idx| self.routes[idx].1.as_slice())
            .unwrap_or_default()
    }

    /// Routes whose membership contains any of `ids`, in route order.
    pub fn routes_serving(&self, ids: &[StationId]) -> Vec<RouteId> {
        self.routes
            .iter()
            .filter(|(_, stations)| stations.iter().any(|s| ids.contains(s)))
            .map(|(route, _)| route.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, &[StationId])> {
        self.routes.iter().map(|(r, s)| (r, s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<(RouteId, Vec<StationId>)> for RouteMembership {
    fn from_iter<T: IntoIterator<Item = (RouteId, Vec<StationId>)>>(iter: T) -> Self {
        let mut membership = RouteMembership::new();
        for (route, stations) in iter {
            membership.insert(route, stations);
        }
        membership
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    fn ids(v: &[&str]) -> Vec<StationId> {
        v.iter().map(|s| StationId::parse(s).unwrap()).collect()
    }

    fn sample() -> RouteMembership {
        [
            (route("L"), ids(&["101", "101N"])),
            (route("4"), ids(&["250"])),
            (route("6"), ids(&["250", "101"])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reverse_lookup_in_route_order() {
        let m = sample();
        assert_eq!(m.routes_serving(&ids(&["101"])), vec![route("L"), route("6")]);
        assert_eq!(m.routes_serving(&ids(&["250"])), vec![route("4"), route("6")]);
    }

    #[test]
    fn reverse_lookup_unions_ids() {
        let m = sample();
        let routes = m.routes_serving(&ids(&["101N", "250"]));
        assert_eq!(routes, vec![route("L"), route("4"), route("6")]);
    }

    #[test]
    fn missing_ids_give_no_routes() {
        let m = sample();
        assert!(m.routes_serving(&ids(&["999"])).is_empty());
        assert!(m.routes_serving(&[]).is_empty());
    }

    #[test]
    fn unknown_route_has_no_stations() {
        let m = sample();
        assert!(m.stations_on(&route("Z")).is_empty());
        assert_eq!(m.stations_on(&route("4")), ids(&["250"]).as_slice());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut m = sample();
        m.insert(route("L"), ids(&["102"]));

        assert_eq!(m.len(), 3);
        let order: Vec<_> = m.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(order, vec!["L", "4", "6"]);
        assert_eq!(m.stations_on(&route("L")), ids(&["102"]).as_slice());
    }
}
