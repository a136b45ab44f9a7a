//! Runtime configuration.
//!
//! Every setting is a long command-line flag that falls back to an
//! environment variable and then to a default.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::refresh::{CommandSourceConfig, DEFAULT_PROGRAM, DEFAULT_TIMEOUT};
use crate::report::ReportOptions;
use crate::resolve::{DEFAULT_NEIGHBOUR_COUNT, MAX_DEPARTURES_PER_DIRECTION, NeighbourDedup};
use crate::store::StoreConfig;

/// Application configuration.
#[derive(Debug, Clone, clap::Args)]
pub struct Config {
    /// Directory with stations.json, route_stops.json and times.json
    #[arg(long, env = "NEARBY_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Where the result document is written
    #[arg(long, env = "NEARBY_RESULTS_PATH", default_value = "results.json")]
    pub results_path: PathBuf,

    /// Number of nearby stops to report
    #[arg(long, env = "NEARBY_NEIGHBOURS", default_value_t = DEFAULT_NEIGHBOUR_COUNT)]
    pub neighbours: usize,

    /// Also deduplicate neighbours against each other
    #[arg(long, env = "NEARBY_MUTUAL_DEDUP")]
    pub mutual_dedup: bool,

    /// Program producing stop listings
    #[arg(long, env = "NEARBY_STOPS_COMMAND", default_value = DEFAULT_PROGRAM)]
    pub stops_command: String,

    /// API key passed to the stop listing program
    #[arg(
        long,
        env = "NEARBY_STOPS_API_KEY",
        default_value = "a",
        hide_env_values = true
    )]
    pub stops_api_key: String,

    /// Serve stop listings from {ROUTE}.txt files here instead of running
    /// the listing program
    #[arg(long, env = "NEARBY_MOCK_LISTINGS_DIR")]
    pub mock_listings_dir: Option<PathBuf>,

    /// Bound on each stop listing invocation, in seconds
    #[arg(
        long,
        env = "NEARBY_REFRESH_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs()
    )]
    pub refresh_timeout_secs: u64,

    /// How many stop listings run at once
    #[arg(
        long,
        env = "NEARBY_REFRESH_CONCURRENCY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub refresh_concurrency: u16,

    /// Google Maps API key for geolocation
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub google_maps_api_key: Option<String>,

    /// Address the HTTP server binds to
    #[arg(long, env = "NEARBY_LISTEN_ADDR", default_value = "127.0.0.1:3000")]
    pub listen_addr: SocketAddr,

    /// How long the server reuses a fetched route timetable, in seconds
    #[arg(long, env = "NEARBY_TIMETABLE_TTL_SECS", default_value_t = 60)]
    pub timetable_ttl_secs: u64,
}

impl Config {
    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }

    pub fn timetable_ttl(&self) -> Duration {
        Duration::from_secs(self.timetable_ttl_secs)
    }

    /// Stop listings run at once, never zero.
    pub fn concurrency(&self) -> usize {
        usize::from(self.refresh_concurrency).max(1)
    }

    /// Key for the geolocation client, empty if unset.
    pub fn geolocation_key(&self) -> &str {
        self.google_maps_api_key.as_deref().unwrap_or_default()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_dir).with_results_path(&self.results_path)
    }

    pub fn command_source_config(&self) -> CommandSourceConfig {
        CommandSourceConfig::new(&self.stops_command, &self.stops_api_key)
            .with_timeout(self.refresh_timeout())
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            neighbours: self.neighbours,
            dedup: if self.mutual_dedup {
                NeighbourDedup::Mutual
            } else {
                NeighbourDedup::AnchorOnly
            },
            max_departures: MAX_DEPARTURES_PER_DIRECTION,
        }
    }
}
