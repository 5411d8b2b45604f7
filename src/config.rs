//! Configuration Module
//!
//! Settings for each cache backend. Values can be built in code or loaded from
//! environment variables; zero or empty fields are replaced by defaults when a
//! cache is constructed, and the resolved settings never change afterwards.

use std::env;
use std::time::Duration;

use tracing::warn;

// == Defaults ==
/// Default time-to-live for entries written without an explicit TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default period between background sweeper passes
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Default Redis connection URL
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default namespace prepended to every Redis key
pub const DEFAULT_REDIS_PREFIX: &str = "RedisCache";

/// Settings for the in-process expiring map cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapCacheConfig {
    /// TTL applied when a write does not carry its own
    pub default_ttl: Duration,
    /// Interval between background sweeps of expired entries
    pub sweep_interval: Duration,
}

impl MapCacheConfig {
    /// Merges an override onto the defaults.
    ///
    /// Any zero field in `overrides` keeps the default; any non-zero field wins.
    pub fn resolve(overrides: MapCacheConfig) -> Self {
        let mut config = Self::default();
        if !overrides.default_ttl.is_zero() {
            config.default_ttl = overrides.default_ttl;
        }
        if !overrides.sweep_interval.is_zero() {
            config.sweep_interval = overrides.sweep_interval;
        }
        config
    }

    /// Loads the map cache settings from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep interval in milliseconds (default: 60000)
    pub fn from_env() -> Self {
        Self::resolve(Self {
            default_ttl: duration_ms_var("CACHE_DEFAULT_TTL_MS"),
            sweep_interval: duration_ms_var("CACHE_SWEEP_INTERVAL_MS"),
        })
    }
}

impl Default for MapCacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

/// Settings for the Redis-backed cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisCacheConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379`
    pub url: String,
    /// TTL applied when a write does not carry its own
    pub default_ttl: Duration,
    /// Namespace; keys are stored as `{prefix}:{key}`
    pub prefix: String,
}

impl RedisCacheConfig {
    /// Merges an override onto the defaults. Empty strings and zero durations
    /// keep the default.
    pub fn resolve(overrides: RedisCacheConfig) -> Self {
        let mut config = Self::default();
        if !overrides.url.is_empty() {
            config.url = overrides.url;
        }
        if !overrides.default_ttl.is_zero() {
            config.default_ttl = overrides.default_ttl;
        }
        if !overrides.prefix.is_empty() {
            config.prefix = overrides.prefix;
        }
        config
    }

    /// Loads the Redis settings from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Connection URL (default: redis://127.0.0.1:6379)
    /// - `REDIS_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `REDIS_KEY_PREFIX` - Key namespace (default: RedisCache)
    pub fn from_env() -> Self {
        Self::resolve(Self {
            url: env::var("REDIS_URL").unwrap_or_default(),
            default_ttl: duration_ms_var("REDIS_DEFAULT_TTL_MS"),
            prefix: env::var("REDIS_KEY_PREFIX").unwrap_or_default(),
        })
    }
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
            default_ttl: DEFAULT_TTL,
            prefix: DEFAULT_REDIS_PREFIX.to_string(),
        }
    }
}

/// Which backend a process should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// In-process expiring map
    #[default]
    Map,
    /// Remote Redis server
    Redis,
}

impl BackendKind {
    /// Reads `CACHE_BACKEND` (`map` or `redis`, case-insensitive).
    ///
    /// Unset means `map`; unknown names are logged and also fall back to `map`.
    pub fn from_env() -> Self {
        match env::var("CACHE_BACKEND") {
            Ok(name) => Self::parse(&name).unwrap_or_else(|| {
                warn!("Unknown CACHE_BACKEND '{}', using the map cache", name);
                Self::Map
            }),
            Err(_) => Self::Map,
        }
    }

    /// Parses a backend name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "map" | "memory" => Some(Self::Map),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

// == Utility Functions ==
/// Reads a millisecond count from the environment; unset or invalid is zero.
fn duration_ms_var(name: &str) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::ZERO)
}
