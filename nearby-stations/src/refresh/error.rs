//! Refresh error types.

use std::time::Duration;

use crate::domain::RouteId;

/// Errors fetching a stop listing for one route.
///
/// None of these abort a refresh: the affected route is skipped.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The listing command did not finish in time
    #[error("stop listing for route {route} timed out after {after:?}")]
    Timeout { route: RouteId, after: Duration },

    /// The listing command could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The listing command exited unsuccessfully
    #[error("stop listing for route {route} failed ({status}): {stderr}")]
    Exit {
        route: RouteId,
        status: String,
        stderr: String,
    },

    /// The listing was not valid UTF-8
    #[error("stop listing for route {route} is not valid UTF-8")]
    Utf8 { route: RouteId },
}

impl RefreshError {
    /// Whether this is a timeout rather than a hard failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RefreshError::Timeout { .. })
    }
}
