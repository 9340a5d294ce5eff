//! Caching layer for planned itineraries.
//!
//! Clients tend to resubmit the same schedule payload, so finished plans
//! are memoised for a short time. The key is the full validated query, so
//! two requests share an entry only when their content is equal. The
//! planner never depends on the cache for correctness.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Itinerary;
use crate::planner::{self, PlanError, PlanQuery};

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(25),
            max_capacity: 1000,
        }
    }
}

/// Cache of itineraries keyed by query content.
pub struct PlanCache {
    plans: MokaCache<Arc<PlanQuery>, Arc<Itinerary>>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Get a cached itinerary.
    pub async fn get(&self, query: &PlanQuery) -> Option<Arc<Itinerary>> {
        self.plans.get(query).await
    }

    /// Insert an itinerary into the cache.
    pub async fn insert(&self, query: Arc<PlanQuery>, itinerary: Arc<Itinerary>) {
        self.plans.insert(query, itinerary).await;
    }

    /// Get cache statistics (for monitoring).
    ///
    /// Moka updates this lazily; call [`PlanCache::sync`] first for an
    /// exact figure.
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Apply pending inserts and evictions.
    pub async fn sync(&self) {
        self.plans.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}

/// Planner with caching and a deadline.
///
/// Runs the synchronous planner on tokio's blocking pool so a large
/// schedule cannot stall the async workers.
pub struct CachedPlanner {
    cache: PlanCache,
    timeout: Duration,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(cache_config: &CacheConfig, timeout: Duration) -> Self {
        Self {
            cache: PlanCache::new(cache_config),
            timeout,
        }
    }

    /// Plan an itinerary, using the cache if available.
    ///
    /// On timeout the blocking task is left to finish in the background and
    /// its result is discarded. Errors are never cached.
    pub async fn plan(&self, query: PlanQuery) -> Result<Arc<Itinerary>, PlanError> {
        // Try cache first
        if let Some(cached) = self.cache.get(&query).await {
            debug!(start = %query.start, end = %query.end, "plan cache hit");
            return Ok(cached);
        }

        let query = Arc::new(query);
        let job = Arc::clone(&query);
        let handle = tokio::task::spawn_blocking(move || planner::plan(&job));

        let itinerary = match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(itinerary)) => Arc::new(itinerary),
            Ok(Err(e)) => return Err(PlanError::TaskFailed(e.to_string())),
            Err(_) => return Err(PlanError::Timeout(self.timeout)),
        };

        // Cache and return
        self.cache.insert(query, itinerary.clone()).await;

        Ok(itinerary)
    }

    /// Access the cache directly.
    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }
}
