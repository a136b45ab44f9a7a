//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::TimetableCache;
use crate::catalog::{RouteMembership, StationCatalog};
use crate::report::ReportOptions;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<S> {
    /// Station records
    pub catalog: Arc<StationCatalog>,

    /// Which stations each route serves
    pub membership: Arc<RouteMembership>,

    /// Route timetables, fetched on demand
    pub timetables: Arc<TimetableCache<S>>,

    /// Report configuration
    pub options: Arc<ReportOptions>,
}

impl<S> AppState<S> {
    /// Create a new app state.
    pub fn new(
        catalog: StationCatalog,
        membership: RouteMembership,
        timetables: TimetableCache<S>,
        options: ReportOptions,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            membership: Arc::new(membership),
            timetables: Arc::new(timetables),
            options: Arc::new(options),
        }
    }
}

// Manual impl: the source itself need not be `Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            membership: Arc::clone(&self.membership),
            timetables: Arc::clone(&self.timetables),
            options: Arc::clone(&self.options),
        }
    }
}
