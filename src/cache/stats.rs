//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, explicit evictions and sweeper work.
//! Counters are atomics so every caller can record without taking a lock.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Stats Counters ==
/// Live counters shared by the store and the sweeper.
#[derive(Debug, Default)]
pub struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expired: AtomicU64,
    sweeps: AtomicU64,
    /// Unix milliseconds of the last completed sweep, 0 if none yet
    last_sweep_ms: AtomicI64,
}

impl StatsCounters {
    /// Creates a new set of counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the explicit eviction counter.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed sweep pass that reclaimed `removed` entries.
    pub fn record_sweep(&self, removed: usize) {
        self.expired.fetch_add(removed as u64, Ordering::Relaxed);
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.last_sweep_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Captures a point-in-time copy of the counters.
    pub fn snapshot(&self, total_entries: usize) -> CacheStats {
        let last_sweep_ms = self.last_sweep_ms.load(Ordering::Relaxed);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
            total_entries,
            last_sweep_at: if last_sweep_ms > 0 {
                DateTime::from_timestamp_millis(last_sweep_ms)
            } else {
                None
            },
        }
    }
}

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of reads that found a live entry
    pub hits: u64,
    /// Number of reads that found nothing or an expired entry
    pub misses: u64,
    /// Number of entries removed by explicit evict calls
    pub evictions: u64,
    /// Number of expired entries reclaimed by the sweeper
    pub expired: u64,
    /// Number of completed sweeper passes
    pub sweeps: u64,
    /// Entries physically held, including expired ones not yet swept
    pub total_entries: usize,
    /// When the last sweep finished
    pub last_sweep_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
