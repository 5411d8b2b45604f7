//! Cache Module
//!
//! The [`Cache`] contract and its backends: an in-process map with TTL
//! expiration and, behind the `redis` feature, a Redis-backed cache.

mod entry;
mod map;
#[cfg(feature = "redis")]
mod redis_cache;
mod stats;
mod store;
mod traits;


// Re-export public types
pub use entry::{CacheEntry, MAX_TTL};
pub use map::MapCache;
#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;
pub use stats::{CacheStats, StatsCounters};
pub use store::ExpiringStore;
pub use traits::Cache;
