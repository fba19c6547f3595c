//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their age checks.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached response body together with the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored bytes
    pub value: Vec<u8>,
    /// When the entry was added
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry timestamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Returns how long the entry has existed as of `now`.
    ///
    /// Saturates to zero if `now` precedes the creation instant.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is NOT expired.
    /// Only a strictly greater age makes it eligible for reaping.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(vec![1, 2, 3]);

        assert_eq!(entry.value, vec![1, 2, 3]);
        assert!(!entry.is_expired(Instant::now(), Duration::from_secs(60)));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(b"body".to_vec());
        let later = entry.created_at + Duration::from_millis(101);

        assert!(entry.is_expired(later, Duration::from_millis(100)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(b"body".to_vec());
        let ttl = Duration::from_millis(100);

        // Exactly at the TTL the entry is still live
        assert!(!entry.is_expired(entry.created_at + ttl, ttl));
        assert!(entry.is_expired(entry.created_at + ttl + Duration::from_nanos(1), ttl));
    }

    #[test]
    fn test_age_saturates_before_creation() {
        let entry = CacheEntry {
            value: Vec::new(),
            created_at: Instant::now() + Duration::from_secs(5),
        };

        assert_eq!(entry.age(Instant::now()), Duration::ZERO);
    }
}
