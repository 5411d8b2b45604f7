//! kv_cache - A pluggable key-value cache
//!
//! One capability contract, [`Cache`], with interchangeable backends:
//!
//! - [`MapCache`]: in-process, thread-safe, with per-entry TTL. Expired entries
//!   are invisible to readers immediately and reclaimed by a background
//!   sweeper owned by the cache.
//! - `RedisCache` (feature `redis`): forwards every call to a Redis server.
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use kv_cache::{Cache, MapCache};
//!
//! # async fn demo() -> kv_cache::error::Result<()> {
//! let cache = MapCache::new()?;
//! cache.put("session", b"token", Some(Duration::from_secs(30))).await?;
//! assert_eq!(cache.get("session").await?, Some(b"token".to_vec()));
//! cache.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use backend::{open, BackendConfig};
pub use cache::{Cache, CacheStats, MapCache};
#[cfg(feature = "redis")]
pub use cache::RedisCache;
pub use config::{MapCacheConfig, RedisCacheConfig};
pub use error::{CacheError, Result};
