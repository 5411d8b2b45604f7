//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Public Constants ==
/// Longest TTL honored; larger TTLs are clamped to this (about 100 years).
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A stored value together with its absolute expiration deadline.
///
/// Entries are never mutated in place: overwriting a key replaces the whole
/// entry, so `expires_at` stays fixed for the entry's lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes, owned by the entry
    value: Vec<u8>,
    /// Monotonic deadline after which the entry is invisible to readers
    expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// TTLs beyond [`MAX_TTL`] are clamped so the deadline never overflows.
    pub fn new(value: Vec<u8>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: deadline(Instant::now(), ttl),
        }
    }

    /// Borrows the stored bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.value
    }

    /// Returns the expiration deadline.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is greater
    /// than or equal to its deadline.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiration against a caller-supplied instant.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the time left before expiration, or zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Utility Functions ==
/// Computes `now + ttl` with `ttl` capped at [`MAX_TTL`].
///
/// Falls back to `now` only on a platform whose clock cannot represent even
/// the capped deadline.
fn deadline(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(b"test_value".to_vec(), Duration::from_secs(60));

        assert_eq!(entry.bytes(), b"test_value");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(b"test_value".to_vec(), Duration::from_millis(100));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(150));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(b"test_value".to_vec(), Duration::from_secs(10));

        let remaining = entry.ttl_remaining();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new(b"test_value".to_vec(), Duration::from_millis(50));

        sleep(Duration::from_millis(100));

        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_huge_ttl_is_clamped() {
        let entry = CacheEntry::new(b"forever".to_vec(), Duration::MAX);

        assert_eq!(entry.bytes(), b"forever");
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() > MAX_TTL - Duration::from_secs(60));
        assert!(entry.ttl_remaining() <= MAX_TTL);
    }

    #[test]
    fn test_deadline_at_max_ttl_boundary() {
        let now = Instant::now();

        assert_eq!(deadline(now, MAX_TTL), now + MAX_TTL);
        assert_eq!(deadline(now, MAX_TTL + Duration::from_nanos(1)), now + MAX_TTL);
        assert_eq!(deadline(now, Duration::from_secs(5)), now + Duration::from_secs(5));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(b"test".to_vec(), Duration::from_secs(1));

        assert!(!entry.is_expired_at(entry.expires_at() - Duration::from_millis(1)));
        assert!(entry.is_expired_at(entry.expires_at()), "Entry should be expired at boundary");
    }
}
