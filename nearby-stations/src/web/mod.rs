//! Web layer for nearby station lookups.
//!
//! Provides HTTP endpoints resolving a position or station id to its
//! departures and nearby stations.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
