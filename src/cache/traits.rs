//! Cache capability contract.
//!
//! Every backend implements [`Cache`], so callers can hold an
//! `Arc<dyn Cache>` and stay independent of where values are stored.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Key-value cache with per-entry expiration.
///
/// # Semantics
///
/// - A missing or expired key is `Ok(None)` from [`get`](Cache::get), never an
///   error. Errors are reserved for genuine backend faults.
/// - `ttl` of `None` (or zero) applies the backend's configured default TTL.
/// - Operations on the same key are linearizable.
/// - Behavior after [`close`](Cache::close) is unspecified; `close` itself
///   must not be called concurrently with itself.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Removes every entry.
    async fn clear(&self) -> Result<()>;

    /// Removes the entry for `key`. Missing keys are not an error.
    async fn evict(&self, key: &str) -> Result<()>;

    /// Returns a copy of the live value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any existing entry.
    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Stores `value` only if no live entry exists for `key`.
    ///
    /// Concurrent calls on the same absent key resolve to exactly one winner.
    /// Returns `true` if this call stored the value.
    async fn put_if_absent(&self, key: &str, value: &[u8], ttl: Option<Duration>)
        -> Result<bool>;

    /// Releases backend resources.
    async fn close(&self) -> Result<()>;
}
