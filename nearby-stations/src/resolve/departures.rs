//! Next departures at a resolved stop.

use tracing::debug;

use crate::catalog::Timetable;
use crate::domain::{ClockTime, Direction, RouteId, StationId};

/// How many upcoming departures are kept per direction.
pub const MAX_DEPARTURES_PER_DIRECTION: usize = 3;

/// Upcoming departures for one route, by direction.
///
/// Only directions with at least one upcoming time are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDepartures {
    pub route: RouteId,
    pub directions: Vec<(Direction, Vec<ClockTime>)>,
}

/// Collect the next departures after `now` for each route at a stop.
///
/// `station_ids` are all ids of the stop (its synonyms); their departure
/// lists are merged. Times equal to `now` have already left and are
/// dropped. At most `limit` times are kept per direction. Routes with no
/// upcoming times at all are omitted. Unparseable times are skipped.
pub fn next_departures(
    timetable: &Timetable,
    routes: &[RouteId],
    station_ids: &[StationId],
    now: ClockTime,
    limit: usize,
) -> Vec<RouteDepartures> {
    let mut result = Vec::new();

    for route in routes {
        let mut directions = Vec::new();

        for direction in Direction::ALL {
            let mut upcoming: Vec<ClockTime> = station_ids
                .iter()
                .flat_map(|id| timetable.times(route, id, direction))
                .filter_map(|raw| match ClockTime::parse_hhmm(raw) {
                    Ok(t) => Some(t),
                    Err(e) => {
                        debug!(route = %route, time = %raw, error = %e, "skipping timetable entry");
                        None
                    }
                })
                .filter(|t| *t > now)
                .collect();

            upcoming.sort();
            upcoming.dedup();
            upcoming.truncate(limit);

            if !upcoming.is_empty() {
                directions.push((direction, upcoming));
            }
        }

        if !directions.is_empty() {
            result.push(RouteDepartures {
                route: route.clone(),
                directions,
            });
        }
    }

    result
}
