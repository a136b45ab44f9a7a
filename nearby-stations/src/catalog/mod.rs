//! Read-only indexes loaded once per run.
//!
//! The station catalog, the route membership index and the timetable are
//! built by the store or the refreshers and then only queried.

mod routes;
mod stations;
mod timetable;

pub use routes::RouteMembership;
pub use stations::{CatalogError, StationCatalog};
pub use timetable::{RouteTimetable, StationTimes, Timetable};
