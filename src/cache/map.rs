//! In-process map cache.
//!
//! [`MapCache`] combines an [`ExpiringStore`] with a [`Sweeper`] it owns: the
//! sweeper is started by the constructor and stopped by [`Cache::close`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::cache::{Cache, CacheStats, ExpiringStore};
use crate::config::MapCacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::Sweeper;

// == Map Cache ==
/// Thread-safe expiring cache living in the current process.
///
/// Construction must happen inside a tokio runtime, which hosts the sweeper.
#[derive(Debug)]
pub struct MapCache {
    config: MapCacheConfig,
    store: Arc<ExpiringStore>,
    /// Taken by `close`; `None` once the sweeper has been stopped
    sweeper: Mutex<Option<Sweeper>>,
}

impl MapCache {
    // == Constructor ==
    /// Creates a cache with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(MapCacheConfig::default())
    }

    /// Creates a cache, filling zero fields of `config` with defaults.
    pub fn with_config(config: MapCacheConfig) -> Result<Self> {
        let config = MapCacheConfig::resolve(config);
        let store = Arc::new(ExpiringStore::new());
        let sweeper = Sweeper::spawn(Arc::clone(&store), config.sweep_interval)?;

        info!(
            default_ttl_ms = config.default_ttl.as_millis() as u64,
            sweep_interval_ms = config.sweep_interval.as_millis() as u64,
            "Map cache initialized"
        );

        Ok(Self {
            config,
            store,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    // == Introspection ==
    /// Returns the resolved configuration.
    pub fn config(&self) -> &MapCacheConfig {
        &self.config
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Number of entries physically held, including expired ones not yet swept.
    pub fn physical_len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if `key` is physically held, even if already expired.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.store.contains_raw(key)
    }

    // == TTL Resolution ==
    fn effective_ttl(&self, ttl: Option<Duration>) -> Duration {
        match ttl {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => self.config.default_ttl,
        }
    }
}

// == Cache Contract ==
#[async_trait]
impl Cache for MapCache {
    async fn clear(&self) -> Result<()> {
        self.store.clear();
        Ok(())
    }

    async fn evict(&self, key: &str) -> Result<()> {
        self.store.evict(key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.store.get(key))
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        self.store.put(key, value, self.effective_ttl(ttl));
        Ok(())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<bool> {
        Ok(self
            .store
            .put_if_absent(key, value, self.effective_ttl(ttl)))
    }

    async fn close(&self) -> Result<()> {
        let sweeper = self
            .sweeper
            .lock()
            .map_err(|e| CacheError::Sweeper(e.to_string()))?
            .take();

        if let Some(sweeper) = sweeper {
            sweeper.stop().await?;
            info!("Map cache closed");
        }
        Ok(())
    }
}
