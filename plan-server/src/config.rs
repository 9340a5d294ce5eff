//! Server configuration.
//!
//! Settings come from environment variables, each with a default:
//!
//! | Variable              | Default          |
//! |-----------------------|------------------|
//! | `PLAN_SERVER_ADDR`    | `127.0.0.1:3000` |
//! | `PLAN_CACHE_TTL_SECS` | `25`             |
//! | `PLAN_CACHE_CAPACITY` | `1000`           |
//! | `PLAN_TIMEOUT_MS`     | `5000`           |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Default bind address.
const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    3000,
);

/// Default planning deadline.
const DEFAULT_PLAN_TIMEOUT: Duration = Duration::from_secs(5);

/// Error loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Result cache settings
    pub cache: CacheConfig,
    /// Deadline for a single planning request
    pub plan_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration using `lookup` to read variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let addr = parse_var(&lookup, "PLAN_SERVER_ADDR")?.unwrap_or(defaults.addr);
        let ttl_secs: Option<u64> = parse_var(&lookup, "PLAN_CACHE_TTL_SECS")?;
        let max_capacity: Option<u64> = parse_var(&lookup, "PLAN_CACHE_CAPACITY")?;
        let timeout_ms: Option<u64> = parse_var(&lookup, "PLAN_TIMEOUT_MS")?;

        Ok(Self {
            addr,
            cache: CacheConfig {
                ttl: ttl_secs.map(Duration::from_secs).unwrap_or(defaults.cache.ttl),
                max_capacity: max_capacity.unwrap_or(defaults.cache.max_capacity),
            },
            plan_timeout: timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.plan_timeout),
        })
    }

    /// Set the bind address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set the planning deadline.
    pub fn with_plan_timeout(mut self, timeout: Duration) -> Self {
        self.plan_timeout = timeout;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            cache: CacheConfig::default(),
            plan_timeout: DEFAULT_PLAN_TIMEOUT,
        }
    }
}

/// Read and parse one variable. Unset or empty means `None`.
fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
