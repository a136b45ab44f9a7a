//! Canned stop listings for development and tests.
//!
//! Serves listings from memory or from a directory of `{ROUTE}.txt` files,
//! as if the listing command had produced them.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::RouteId;

use super::error::RefreshError;
use super::source::StopListingSource;

/// Stop listing source backed by fixed text.
///
/// A route without a listing behaves like a listing command that timed out.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    listings: Arc<HashMap<String, String>>,
    calls: Arc<Mutex<Vec<RouteId>>>,
}

impl MockSource {
    pub fn new<R, L>(listings: impl IntoIterator<Item = (R, L)>) -> Self
    where
        R: Into<String>,
        L: Into<String>,
    {
        Self {
            listings: Arc::new(
                listings
                    .into_iter()
                    .map(|(r, l)| (r.into(), l.into()))
                    .collect(),
            ),
            calls: Arc::default(),
        }
    }

    /// Load every `{ROUTE}.txt` file in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let mut listings = HashMap::new();

        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("txt") {
                continue;
            }
            let Some(route) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            listings.insert(route.to_string(), std::fs::read_to_string(&path)?);
        }

        Ok(Self::new(listings))
    }

    /// Routes asked for so far, in call order.
    pub fn calls(&self) -> Vec<RouteId> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl StopListingSource for MockSource {
    async fn stop_listing(&self, route: &RouteId) -> Result<String, RefreshError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(route.clone());
        }
        self.listings
            .get(route.as_str())
            .cloned()
            .ok_or_else(|| RefreshError::Timeout {
                route: route.clone(),
                after: Duration::ZERO,
            })
    }
}
