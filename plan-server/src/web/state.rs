//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedPlanner;
use crate::config::ServerConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Planner with result caching
    pub planner: Arc<CachedPlanner>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: CachedPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }

    /// Create app state from server configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(CachedPlanner::new(&config.cache, config.plan_timeout))
    }
}
