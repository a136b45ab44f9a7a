//! Regenerating route membership and timetables from stop listings.
//!
//! Timetable refreshes only ever touch routes in
//! [`CANONICAL_ROUTES`](crate::domain::CANONICAL_ROUTES). A route whose
//! listing fails or times out is logged and skipped; it never aborts the
//! refresh of the remaining routes.

mod error;
mod mock;
mod parse;
mod source;

pub use error::RefreshError;
pub use mock::MockSource;
pub use parse::{parse_route_stops, parse_route_timetable};
pub use source::{
    CommandSource, CommandSourceConfig, DEFAULT_PROGRAM, DEFAULT_TIMEOUT, StopListingSource,
};

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::catalog::{RouteMembership, RouteTimetable, Timetable};
use crate::domain::RouteId;

/// Fetch listings for `routes`, at most `concurrency` at a time.
///
/// Results come back in the order of `routes`.
async fn fetch_all<S: StopListingSource>(
    source: &S,
    routes: &[RouteId],
    concurrency: usize,
) -> Vec<(RouteId, Result<String, RefreshError>)> {
    stream::iter(routes)
        .map(|route| async move { (route.clone(), source.stop_listing(route).await) })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Rebuild route membership for `routes`.
///
/// Routes listing no stations are left out.
pub async fn refresh_route_stops<S: StopListingSource>(
    source: &S,
    routes: &[RouteId],
    concurrency: usize,
) -> RouteMembership {
    let mut membership = RouteMembership::new();

    for (route, result) in fetch_all(source, routes, concurrency).await {
        match result {
            Ok(listing) => {
                let stations = parse_route_stops(&listing);
                if stations.is_empty() {
                    warn!(route = %route, "no stations found for route");
                    continue;
                }
                membership.insert(route, stations);
            }
            Err(e) => warn!(route = %route, error = %e, "skipping route"),
        }
    }

    info!(routes = membership.len(), "refreshed route membership");
    membership
}

/// Fetch and parse the timetable of a single route.
pub async fn fetch_route_timetable<S: StopListingSource>(
    source: &S,
    route: &RouteId,
) -> Result<RouteTimetable, RefreshError> {
    let listing = source.stop_listing(route).await?;
    Ok(parse_route_timetable(&listing))
}

/// Refresh timetables for the requested routes.
///
/// Routes outside the canonical list are ignored. A route whose listing
/// fails is recorded with an empty timetable so that merging the result
/// clears any stale departures for it.
pub async fn refresh_timetable<S: StopListingSource>(
    source: &S,
    requested: &[RouteId],
    concurrency: usize,
) -> Timetable {
    let routes: Vec<RouteId> = requested
        .iter()
        .filter(|route| {
            let known = route.is_canonical();
            if !known {
                warn!(route = %route, "ignoring unknown route");
            }
            known
        })
        .cloned()
        .collect();

    let mut timetable = Timetable::new();

    for (route, result) in fetch_all(source, &routes, concurrency).await {
        let route_timetable = match result {
            Ok(listing) => parse_route_timetable(&listing),
            Err(e) => {
                warn!(route = %route, error = %e, "skipping route");
                RouteTimetable::default()
            }
        };
        timetable.insert(route, route_timetable);
    }

    info!(routes = timetable.len(), "refreshed timetables");
    timetable
}
