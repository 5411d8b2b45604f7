//! Backend selection.
//!
//! Builds a [`Cache`] from configuration so callers only ever see the
//! contract, never the concrete backend.

use std::sync::Arc;

#[cfg(not(feature = "redis"))]
use tracing::warn;

use crate::cache::{Cache, MapCache};
use crate::config::{BackendKind, MapCacheConfig};
use crate::error::Result;

#[cfg(feature = "redis")]
use crate::cache::RedisCache;
#[cfg(feature = "redis")]
use crate::config::RedisCacheConfig;

/// Which backend to construct, with its settings.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// In-process expiring map
    Map(MapCacheConfig),
    /// Remote Redis server
    #[cfg(feature = "redis")]
    Redis(RedisCacheConfig),
}

impl BackendConfig {
    /// Picks the backend named by `CACHE_BACKEND` and loads its settings from
    /// the environment.
    pub fn from_env() -> Self {
        match BackendKind::from_env() {
            BackendKind::Map => Self::Map(MapCacheConfig::from_env()),
            #[cfg(feature = "redis")]
            BackendKind::Redis => Self::Redis(RedisCacheConfig::from_env()),
            #[cfg(not(feature = "redis"))]
            BackendKind::Redis => {
                warn!("Redis support is not compiled in, using the map cache");
                Self::Map(MapCacheConfig::from_env())
            }
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Map(MapCacheConfig::default())
    }
}

/// Constructs the configured backend.
///
/// The map cache must be opened inside a tokio runtime.
pub async fn open(config: BackendConfig) -> Result<Arc<dyn Cache>> {
    match config {
        BackendConfig::Map(config) => Ok(Arc::new(MapCache::with_config(config)?)),
        #[cfg(feature = "redis")]
        BackendConfig::Redis(config) => Ok(Arc::new(RedisCache::connect(config).await?)),
    }
}
