//! Cache Store Module
//!
//! Concurrent key-value storage with lazy TTL expiration.
//!
//! The mapping is a sharded [`DashMap`], so callers on different shards never
//! contend and no operation takes a global lock. Reads treat expired entries
//! as absent without removing them; physical removal is left to
//! [`ExpiringStore::sweep_expired`] and to later writes on the same key.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::cache::{CacheEntry, CacheStats, StatsCounters};

// == Expiring Store ==
/// Thread-safe map from string keys to expiring byte values.
#[derive(Debug)]
pub struct ExpiringStore {
    /// Key-value storage
    entries: DashMap<String, CacheEntry>,
    /// Activity counters
    stats: StatsCounters,
}

impl ExpiringStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            stats: StatsCounters::new(),
        }
    }

    // == Get ==
    /// Returns a copy of the live value for `key`.
    ///
    /// Missing and expired keys both yield `None`. Expired entries stay in the
    /// map until swept or overwritten.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.bytes().to_vec());

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Put ==
    /// Stores a copy of `value` under `key`, replacing any existing entry.
    pub fn put(&self, key: &str, value: &[u8], ttl: Duration) {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
    }

    // == Put If Absent ==
    /// Stores `value` only when no live entry exists for `key`.
    ///
    /// An expired entry still sitting in the map counts as absent and is
    /// replaced. The check and the insert happen under the key's shard lock,
    /// so among concurrent callers on the same absent key exactly one wins.
    ///
    /// Returns `true` if the value was stored.
    pub fn put_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> bool {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired() {
                    occupied.insert(CacheEntry::new(value.to_vec(), ttl));
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry::new(value.to_vec(), ttl));
                true
            }
        }
    }

    // == Evict ==
    /// Removes the entry for `key`. Missing keys are a no-op.
    pub fn evict(&self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.stats.record_eviction();
        }
    }

    // == Clear ==
    /// Removes every entry.
    ///
    /// Returns once all shards have been emptied; a write issued after this
    /// call returns is never affected by it.
    pub fn clear(&self) {
        self.entries.clear();
    }

    // == Sweep Expired ==
    /// Physically removes every entry that is expired at the start of the pass.
    ///
    /// Keys are collected first and removed afterwards, so no shard lock is
    /// held across the whole traversal. Each removal re-checks expiry under
    /// the shard lock, so a key rewritten with a live value mid-sweep survives.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.is_expired_at(now))
            .map(|entry| entry.key().clone())
            .collect();

        let removed = expired
            .iter()
            .filter(|key| {
                self.entries
                    .remove_if(key.as_str(), |_, entry| entry.is_expired())
                    .is_some()
            })
            .count();

        self.stats.record_sweep(removed);
        removed
    }

    // == Introspection ==
    /// Returns the number of entries physically held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are physically held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is physically present, even if expired.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }
}

impl Default for ExpiringStore {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread::{self, sleep};

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store = ExpiringStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_put_and_get() {
        let store = ExpiringStore::new();

        store.put("key1", b"value1", TTL);

        assert_eq!(store.get("key1").as_deref(), Some(&b"value1"[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = ExpiringStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_get_returns_copy() {
        let store = ExpiringStore::new();
        store.put("key1", b"value1", TTL);

        let mut copy = store.get("key1").unwrap();
        copy[0] = b'X';

        assert_eq!(store.get("key1").as_deref(), Some(&b"value1"[..]));
    }

    #[test]
    fn test_store_put_copies_caller_buffer() {
        let store = ExpiringStore::new();
        let mut buffer = b"value1".to_vec();
        store.put("key1", &buffer, TTL);

        buffer[0] = b'X';

        assert_eq!(store.get("key1").as_deref(), Some(&b"value1"[..]));
    }

    #[test]
    fn test_store_overwrite() {
        let store = ExpiringStore::new();

        store.put("key1", b"value1", TTL);
        store.put("key1", b"value2", TTL);

        assert_eq!(store.get("key1").as_deref(), Some(&b"value2"[..]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_resets_expiry() {
        let store = ExpiringStore::new();

        store.put("key1", b"short", Duration::from_millis(50));
        store.put("key1", b"long", TTL);
        sleep(Duration::from_millis(100));

        assert_eq!(store.get("key1").as_deref(), Some(&b"long"[..]));
    }

    #[test]
    fn test_store_ttl_expiration_is_lazy() {
        let store = ExpiringStore::new();

        store.put("key1", b"value1", Duration::from_millis(100));
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(150));

        assert!(store.get("key1").is_none());
        assert!(store.contains_raw("key1"), "Reads must not remove entries");
    }

    #[test]
    fn test_store_put_if_absent_keeps_existing() {
        let store = ExpiringStore::new();

        assert!(store.put_if_absent("key1", b"value1", TTL));
        assert!(!store.put_if_absent("key1", b"value2", TTL));

        assert_eq!(store.get("key1").as_deref(), Some(&b"value1"[..]));
    }

    #[test]
    fn test_store_put_if_absent_replaces_expired() {
        let store = ExpiringStore::new();

        store.put("key1", b"stale", Duration::from_millis(50));
        sleep(Duration::from_millis(100));
        assert!(store.contains_raw("key1"));

        assert!(store.put_if_absent("key1", b"fresh", TTL));
        assert_eq!(store.get("key1").as_deref(), Some(&b"fresh"[..]));
    }

    #[test]
    fn test_store_put_if_absent_single_winner() {
        let store = Arc::new(ExpiringStore::new());
        let threads = 16;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.put_if_absent("contested", format!("value{}", i).as_bytes(), TTL)
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_evict() {
        let store = ExpiringStore::new();

        store.put("key1", b"value1", TTL);
        store.evict("key1");

        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_evict_nonexistent() {
        let store = ExpiringStore::new();

        store.evict("nonexistent");

        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_clear() {
        let store = ExpiringStore::new();
        for i in 0..10 {
            store.put(&format!("key{}", i), b"value", TTL);
        }

        store.clear();

        assert!(store.is_empty());
        for i in 0..10 {
            assert!(store.get(&format!("key{}", i)).is_none());
        }

        store.put("key0", b"after", TTL);
        assert_eq!(store.get("key0").as_deref(), Some(&b"after"[..]));
    }

    #[test]
    fn test_store_stats() {
        let store = ExpiringStore::new();

        store.put("key1", b"value1", TTL);
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_sweep_expired() {
        let store = ExpiringStore::new();

        store.put("key1", b"value1", Duration::from_millis(50));
        store.put("key2", b"value2", Duration::from_millis(50));
        store.put("key3", b"value3", TTL);

        sleep(Duration::from_millis(100));

        let removed = store.sweep_expired();
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(!store.contains_raw("key1"));
        assert!(!store.contains_raw("key2"));
        assert!(store.get("key3").is_some());

        let stats = store.stats();
        assert_eq!(stats.expired, 2);
        assert_eq!(stats.sweeps, 1);
    }

    #[test]
    fn test_store_sweep_nothing_expired() {
        let store = ExpiringStore::new();
        store.put("key1", b"value1", TTL);

        assert_eq!(store.sweep_expired(), 0);
        assert_eq!(store.len(), 1);
    }
}
