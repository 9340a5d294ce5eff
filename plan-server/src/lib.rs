//! Flight itinerary planner server.
//!
//! A web service that answers: "given these flights, what is the quickest
//! way from here to there if I leave after this time?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod planner;
pub mod web;
