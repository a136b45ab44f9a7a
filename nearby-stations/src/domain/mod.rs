//! Domain types for station lookup.
//!
//! Identifiers, coordinate strings and timetable times are validated at
//! construction, so the catalog and resolver can trust what they receive.

mod coord;
mod route;
mod station;
mod time;

pub use coord::{
    Coordinate, CoordinateError, EARTH_RADIUS_KM, KM_TO_MILES, haversine_km, km_to_miles_rounded,
};
pub use route::{CANONICAL_ROUTES, Direction, InvalidRouteId, RouteId};
pub use station::{InvalidStationId, StationId, StationRecord};
pub use time::{ClockTime, TimeError};
