//! Where stop listings come from.

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::domain::RouteId;

use super::error::RefreshError;

/// Default command producing stop listings.
pub const DEFAULT_PROGRAM: &str = "underground";

/// Default bound on a single listing command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Trait for fetching the raw stop listing of a route.
///
/// This abstraction allows the refreshers to be tested without running
/// the external command.
pub trait StopListingSource {
    fn stop_listing(
        &self,
        route: &RouteId,
    ) -> impl Future<Output = Result<String, RefreshError>> + Send;
}

/// Configuration for [`CommandSource`].
#[derive(Debug, Clone)]
pub struct CommandSourceConfig {
    /// Program to run
    pub program: String,
    /// Value passed as `--api-key`
    pub api_key: String,
    /// Bound on each invocation
    pub timeout: Duration,
}

impl CommandSourceConfig {
    pub fn new(program: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CommandSourceConfig {
    fn default() -> Self {
        // The listing tool only checks that a key is present
        Self::new(DEFAULT_PROGRAM, "a")
    }
}

/// Runs `<program> stops <route> -f %H:%M --api-key <key>` per route.
#[derive(Debug, Clone)]
pub struct CommandSource {
    config: CommandSourceConfig,
}

impl CommandSource {
    pub fn new(config: CommandSourceConfig) -> Self {
        Self { config }
    }

    fn command(&self, route: &RouteId) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg("stops")
            .arg(route.as_str())
            .args(["-f", "%H:%M", "--api-key"])
            .arg(&self.config.api_key)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

impl StopListingSource for CommandSource {
    async fn stop_listing(&self, route: &RouteId) -> Result<String, RefreshError> {
        debug!(route = %route, program = %self.config.program, "fetching stop listing");

        let mut cmd = self.command(route);
        let output = tokio::time::timeout(self.config.timeout, cmd.output())
            .await
            .map_err(|_| RefreshError::Timeout {
                route: route.clone(),
                after: self.config.timeout,
            })?
            .map_err(|e| RefreshError::Spawn {
                program: self.config.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(RefreshError::Exit {
                route: route.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| RefreshError::Utf8 {
            route: route.clone(),
        })
    }
}
