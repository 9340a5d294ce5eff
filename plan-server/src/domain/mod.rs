//! Domain types for the flight planner.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod city;
mod error;
mod itinerary;
mod leg;
mod time;

pub use city::{City, InvalidCity};
pub use error::DomainError;
pub use itinerary::{Itinerary, Stop};
pub use leg::Leg;
pub use time::Timestamp;
