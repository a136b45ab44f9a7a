use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nearby_stations::app::{
    RunError, RunOptions, load_indexes, run_lookup, run_refresh_stops, run_refresh_times,
};
use nearby_stations::cache::{CacheConfig, TimetableCache};
use nearby_stations::config::Config;
use nearby_stations::domain::{ClockTime, StationId};
use nearby_stations::geolocate::{GeolocationClient, GeolocationConfig};
use nearby_stations::refresh::{CommandSource, MockSource, StopListingSource};
use nearby_stations::resolve::Query;
use nearby_stations::store::DataStore;
use nearby_stations::web::{AppState, create_router};

const INVALID_STATION: &str = "Invalid station ID.";

/// Nearest subway stations, the routes serving them and their next
/// departures.
#[derive(Debug, Parser)]
#[command(name = "nearby-stations", version)]
struct Cli {
    /// Station to look up; without one the current position is geolocated
    #[arg(value_name = "STATION_ID")]
    station_id: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    config: Config,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Regenerate route_stops.json from every canonical route
    RefreshStops,
    /// Refresh times.json for every canonical route
    RefreshTimes,
    /// Serve lookups over HTTP
    Serve,
}

impl Cli {
    /// A station id and a subcommand are mutually exclusive.
    fn validate(&self) -> Result<(), clap::Error> {
        if self.station_id.is_some() && self.command.is_some() {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "a station id cannot be combined with a subcommand",
            ));
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }
    let Cli {
        station_id,
        command,
        config,
    } = cli;

    let result = match &config.mock_listings_dir {
        Some(dir) => match MockSource::from_dir(dir) {
            Ok(source) => {
                info!(dir = %dir.display(), "serving stop listings from files");
                run(station_id, command, &config, source).await
            }
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "cannot read stop listings");
                return ExitCode::FAILURE;
            }
        },
        None => {
            let source = CommandSource::new(config.command_source_config());
            run(station_id, command, &config, source).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_unknown_station() => {
            println!("{INVALID_STATION}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run<S>(
    station_id: Option<String>,
    command: Option<Command>,
    config: &Config,
    source: S,
) -> Result<(), RunError>
where
    S: StopListingSource + Send + Sync + 'static,
{
    let store = DataStore::new(config.store_config());

    match command {
        None => {
            let query = match station_id {
                Some(raw) => StationId::parse_normalized(&raw)
                    .map(Query::Id)
                    .map_err(|_| RunError::InvalidStation(raw))?,
                None => {
                    let client = GeolocationClient::new(GeolocationConfig::new(
                        config.geolocation_key(),
                    ))?;
                    Query::Position(client.locate().await?)
                }
            };

            let options = RunOptions {
                report: config.report_options(),
                refresh_concurrency: config.concurrency(),
            };
            let report =
                run_lookup(&store, &source, &query, ClockTime::now_local(), &options).await?;

            println!(
                "{} ({}): {} route(s), {} nearby station(s) written to {}",
                report.station.name,
                report.station.id,
                report.routes.len(),
                report.neighbours.len(),
                store.results_path().display()
            );
        }
        Some(Command::RefreshStops) => {
            let membership = run_refresh_stops(&store, &source, config.concurrency()).await?;
            println!("Refreshed stops for {} route(s)", membership.len());
        }
        Some(Command::RefreshTimes) => {
            let timetable = run_refresh_times(&store, &source, config.concurrency()).await?;
            println!("Refreshed timetables for {} route(s)", timetable.len());
        }
        Some(Command::Serve) => serve(config, &store, source).await?,
    }

    Ok(())
}

async fn serve<S>(config: &Config, store: &DataStore, source: S) -> Result<(), RunError>
where
    S: StopListingSource + Send + Sync + 'static,
{
    let (catalog, membership) = load_indexes(store)?;
    let cache_config = CacheConfig {
        ttl: config.timetable_ttl(),
        ..CacheConfig::default()
    };
    let state = AppState::new(
        catalog,
        membership,
        TimetableCache::new(source, &cache_config),
        config.report_options(),
    );

    let app = create_router(state);

    let addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "nearby stations listening");
    info!("GET /health, GET /nearby?lat=&lon=, GET /stations/:id");

    axum::serve(listener, app).await?;
    Ok(())
}
