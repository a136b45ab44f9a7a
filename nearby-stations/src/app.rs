//! One command-line run, end to end.
//!
//! Loads the data files, resolves the anchor station, refreshes the
//! timetables of the routes serving it, builds the report and writes the
//! result document.

use tracing::{info, warn};

use crate::catalog::{RouteMembership, StationCatalog, Timetable};
use crate::domain::{ClockTime, RouteId};
use crate::geolocate::GeolocateError;
use crate::refresh::{StopListingSource, refresh_route_stops, refresh_timetable};
use crate::report::{NearbyReport, ReportOptions};
use crate::resolve::{Query, ResolveError, Resolver};
use crate::store::{DataStore, StoreError};

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("invalid station id {0:?}")]
    InvalidStation(String),

    #[error("geolocation failed: {0}")]
    Geolocate(#[from] GeolocateError),

    /// Every route listing failed; the stored membership was kept.
    #[error("no route listed any stations")]
    NothingRefreshed,

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl RunError {
    /// Whether the run failed because the requested station is unknown.
    pub fn is_unknown_station(&self) -> bool {
        matches!(
            self,
            RunError::InvalidStation(_) | RunError::Resolve(ResolveError::NotFound(_))
        )
    }
}

/// Settings for a lookup run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub report: ReportOptions,
    /// How many stop listings run at once.
    pub refresh_concurrency: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            report: ReportOptions::default(),
            refresh_concurrency: 1,
        }
    }
}

/// Resolve `query`, refresh the timetables it needs and write the report.
///
/// Only routes serving the resolved station are refreshed. Their fresh
/// entries replace the stored ones in `times.json`; other routes keep
/// their stored timetables.
pub async fn run_lookup<S: StopListingSource>(
    store: &DataStore,
    source: &S,
    query: &Query,
    now: ClockTime,
    options: &RunOptions,
) -> Result<NearbyReport, RunError> {
    let catalog = store.load_catalog()?;
    let membership = store.load_route_membership()?;
    let resolver = Resolver::new(&catalog, &membership);

    let anchor = resolver.resolve(query)?;
    let routes = resolver.routes_for(anchor);
    info!(
        station = %anchor.id,
        name = %anchor.name,
        routes = routes.len(),
        "resolved station"
    );

    let timetable = refresh_for(store, source, &routes, options.refresh_concurrency).await?;

    let report = NearbyReport::build(&resolver, anchor, &timetable, now, &options.report);
    store.write_report(&report.document())?;
    info!(
        path = %store.results_path().display(),
        neighbours = report.neighbours.len(),
        "wrote results"
    );

    Ok(report)
}

async fn refresh_for<S: StopListingSource>(
    store: &DataStore,
    source: &S,
    routes: &[RouteId],
    concurrency: usize,
) -> Result<Timetable, RunError> {
    if routes.is_empty() {
        warn!("station is not on any known route");
        return Ok(store.load_timetable()?);
    }
    let fresh = refresh_timetable(source, routes, concurrency).await;
    Ok(store.merge_timetable(fresh)?)
}

/// Regenerate `route_stops.json` for every canonical route.
///
/// The stored file is left alone if no route yields any stations.
pub async fn run_refresh_stops<S: StopListingSource>(
    store: &DataStore,
    source: &S,
    concurrency: usize,
) -> Result<RouteMembership, RunError> {
    let membership = refresh_route_stops(source, &RouteId::canonical(), concurrency).await;
    if membership.is_empty() {
        return Err(RunError::NothingRefreshed);
    }
    store.save_route_membership(&membership)?;
    info!(
        path = %store.route_stops_path().display(),
        routes = membership.len(),
        "saved route membership"
    );
    Ok(membership)
}

/// Refresh and store the timetable of every canonical route.
pub async fn run_refresh_times<S: StopListingSource>(
    store: &DataStore,
    source: &S,
    concurrency: usize,
) -> Result<Timetable, RunError> {
    let fresh = refresh_timetable(source, &RouteId::canonical(), concurrency).await;
    let merged = store.merge_timetable(fresh)?;
    info!(path = %store.times_path().display(), "saved timetables");
    Ok(merged)
}

/// Load the catalog and membership the HTTP server answers from.
pub fn load_indexes(store: &DataStore) -> Result<(StationCatalog, RouteMembership), RunError> {
    let catalog = store.load_catalog()?;
    let membership = store.load_route_membership()?;
    info!(
        stations = catalog.len(),
        routes = membership.len(),
        "loaded indexes"
    );
    Ok((catalog, membership))
}
