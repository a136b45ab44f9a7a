//! Parsing stop listings.
//!
//! A listing is plain text: a header line, one line per platform, then two
//! trailing framing lines. Each platform line is a platform id (station id
//! plus `N`/`S`) followed by zero or more `HH:MM` departure times.
//!
//! ```text
//! Stop     Departures
//! 101N     12:10 12:20 12:40
//! 101S     12:15
//! ...
//! <footer>
//! ```

use tracing::trace;

use crate::catalog::RouteTimetable;
use crate::domain::{Direction, StationId};

/// The platform lines of a listing, without header and footer.
fn body_lines(listing: &str) -> Vec<&str> {
    let lines: Vec<&str> = listing.split('\n').collect();
    let end = lines.len().saturating_sub(2);
    if end > 1 {
        lines[1..end].to_vec()
    } else {
        Vec::new()
    }
}

/// Station ids served by a route: direction suffix removed, deduplicated, sorted.
pub fn parse_route_stops(listing: &str) -> Vec<StationId> {
    let mut stations: Vec<StationId> = body_lines(listing)
        .into_iter()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|token| match StationId::parse(token) {
            Ok(id) => Some(id.without_direction()),
            Err(e) => {
                trace!(token, error = %e, "ignoring listing line");
                None
            }
        })
        .collect();

    stations.sort();
    stations.dedup();
    stations
}

/// Per-station departure lists for a route.
///
/// The last character of each platform id is its direction; lines with an
/// unknown direction or a one-character id are ignored.
pub fn parse_route_timetable(listing: &str) -> RouteTimetable {
    let mut timetable = RouteTimetable::default();

    for line in body_lines(listing) {
        let mut parts = line.split_whitespace();
        let Some(platform) = parts.next() else {
            continue;
        };

        let Some((station, direction)) = split_platform(platform) else {
            trace!(platform, "ignoring listing line");
            continue;
        };

        let times: Vec<String> = parts.map(str::to_string).collect();
        timetable
            .stations
            .entry(station)
            .or_default()
            .set(direction, times);
    }

    timetable
}

/// Split `101N` into (`101`, North).
fn split_platform(platform: &str) -> Option<(StationId, Direction)> {
    let mut chars = platform.chars();
    let direction = Direction::from_code(chars.next_back()?)?;
    let station = StationId::parse(chars.as_str()).ok()?;
    Some((station, direction))
}
