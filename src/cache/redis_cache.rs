//! Redis-backed cache.
//!
//! Forwards every operation to a Redis server and relies on the server for
//! expiration and consistency. Keys are namespaced as `{prefix}:{key}` so
//! several caches can share one server and [`Cache::clear`] only touches its
//! own keys.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Script};
use tracing::{debug, info};

use crate::cache::{Cache, MAX_TTL};
use crate::config::RedisCacheConfig;
use crate::error::Result;

/// Deletes every key matching ARGV[1] in batches, tolerating zero matches.
const CLEAR_SCRIPT: &str = r"
local keys = redis.call('KEYS', ARGV[1])
for i = 1, #keys, 5000 do
    redis.call('DEL', unpack(keys, i, math.min(i + 4999, #keys)))
end
return #keys
";

/// Cache stored in a Redis server.
pub struct RedisCache {
    config: RedisCacheConfig,
    connection: ConnectionManager,
}

impl RedisCache {
    /// Connects with the default configuration.
    pub async fn connect_default() -> Result<Self> {
        Self::connect(RedisCacheConfig::default()).await
    }

    /// Connects to the server named in `config`; empty or zero fields take
    /// their defaults.
    pub async fn connect(config: RedisCacheConfig) -> Result<Self> {
        let config = RedisCacheConfig::resolve(config);
        let client = Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        info!(prefix = %config.prefix, "Redis cache connected");

        Ok(Self { config, connection })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &RedisCacheConfig {
        &self.config
    }

    fn key_name(&self, key: &str) -> String {
        namespaced(&self.config.prefix, key)
    }

    fn ttl_millis(&self, ttl: Option<Duration>) -> u64 {
        ttl_millis(ttl, self.config.default_ttl)
    }
}

fn namespaced(prefix: &str, key: &str) -> String {
    format!("{}:{}", prefix, key)
}

/// Redis rejects `PX 0`, so anything under a millisecond rounds up. TTLs
/// are capped at [`MAX_TTL`] like the map cache, which keeps `PX` in range.
fn ttl_millis(ttl: Option<Duration>, default_ttl: Duration) -> u64 {
    let ttl = match ttl {
        Some(ttl) if !ttl.is_zero() => ttl,
        _ => default_ttl,
    };
    u64::try_from(ttl.min(MAX_TTL).as_millis())
        .unwrap_or(u64::MAX)
        .max(1)
}

#[async_trait]
impl Cache for RedisCache {
    async fn clear(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let deleted: i64 = Script::new(CLEAR_SCRIPT)
            .arg(namespaced(&self.config.prefix, "*"))
            .invoke_async(&mut conn)
            .await?;
        debug!(deleted, prefix = %self.config.prefix, "Redis cache cleared");
        Ok(())
    }

    async fn evict(&self, key: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: i64 = conn.del(self.key_name(key)).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection.clone();
        let value: Option<Vec<u8>> = conn.get(self.key_name(key)).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("SET")
            .arg(self.key_name(key))
            .arg(value)
            .arg("PX")
            .arg(self.ttl_millis(ttl))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<bool> {
        let mut conn = self.connection.clone();
        let stored: Option<String> = redis::cmd("SET")
            .arg(self.key_name(key))
            .arg(value)
            .arg("PX")
            .arg(self.ttl_millis(ttl))
            .arg("NX")
            .query_async(&mut conn)
            .await?;
        Ok(stored.is_some())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
