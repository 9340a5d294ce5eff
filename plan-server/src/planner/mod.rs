//! Flight planner using Dijkstra's algorithm.
//!
//! This module implements the core planning algorithm that answers:
//! "Given these scheduled flights, what is the quickest way from here to
//! there if I leave after a given time?"
//!
//! Planning is split in two: [`FlightGraph`] ingests the legs into an
//! adjacency map and a duration table, then [`solve`] searches it for the
//! route with the smallest total flight time. [`plan`] does both and
//! converts the route into an [`Itinerary`](crate::domain::Itinerary).

mod error;
mod graph;
mod query;
mod solver;

pub use error::PlanError;
pub use graph::{DurationTable, Edge, FlightGraph};
pub use query::{PlanQuery, plan};
pub use solver::solve;
