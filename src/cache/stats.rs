//! Counters behind the `cache` command.

use serde::Serialize;

/// Lookup and sweep counters for one [`TtlCache`](crate::TtlCache).
///
/// Updated under the store lock, so a snapshot is always self-consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// `get` calls answered from the cache
    pub hits: u64,
    /// `get` calls for an absent key
    pub misses: u64,
    /// Entries dropped by reaper sweeps, summed over the cache's lifetime
    pub reaped: u64,
    /// Entries held right now
    pub total_entries: usize,
}

/// Serialized form of a stats snapshot with the derived hit rate alongside.
#[derive(Debug, Serialize)]
pub struct StatsReport<'a> {
    #[serde(flatten)]
    pub stats: &'a CacheStats,
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of lookups that were hits, in `0.0..=1.0`. No lookups yet reads as `0.0`.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    /// Pairs the counters with [`CacheStats::hit_rate`] for display.
    pub fn report(&self) -> StatsReport<'_> {
        StatsReport {
            stats: self,
            hit_rate: self.hit_rate(),
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_reaped(&mut self, count: usize) {
        self.reaped += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
