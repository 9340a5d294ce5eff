//! Web layer for the flight planner.
//!
//! Provides the HTTP endpoint for planning trips.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
