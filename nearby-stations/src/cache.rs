//! Caching layer for route timetables.
//!
//! Running the listing command is slow, and the HTTP server may be asked
//! about many stations on the same routes in quick succession. Parsed
//! route timetables are cached for a short TTL so departures stay fresh.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::catalog::{RouteTimetable, Timetable};
use crate::domain::RouteId;
use crate::refresh::{RefreshError, StopListingSource, fetch_route_timetable};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 64,
        }
    }
}

/// Stop listing source with cached, parsed route timetables.
pub struct TimetableCache<S> {
    source: S,
    routes: MokaCache<RouteId, Arc<RouteTimetable>>,
}

impl<S: StopListingSource> TimetableCache<S> {
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, routes }
    }

    /// Timetable of one route, from cache if available.
    ///
    /// Failed fetches are not cached.
    pub async fn route_timetable(
        &self,
        route: &RouteId,
    ) -> Result<Arc<RouteTimetable>, RefreshError> {
        if let Some(cached) = self.routes.get(route).await {
            debug!(route = %route, "timetable cache hit");
            return Ok(cached);
        }

        let entry = Arc::new(fetch_route_timetable(&self.source, route).await?);
        self.routes.insert(route.clone(), entry.clone()).await;
        Ok(entry)
    }

    /// Timetable covering `routes`.
    ///
    /// Routes outside the canonical list and routes whose listing fails are
    /// left out, so they simply have no departures.
    pub async fn timetable_for(&self, routes: &[RouteId]) -> Timetable {
        let mut timetable = Timetable::new();

        for route in routes.iter().filter(|r| r.is_canonical()) {
            match self.route_timetable(route).await {
                Ok(entry) => timetable.insert(route.clone(), RouteTimetable::clone(&entry)),
                Err(e) => warn!(route = %route, error = %e, "no timetable for route"),
            }
        }

        timetable
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}
