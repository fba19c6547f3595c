//! Cache Module
//!
//! Provides an in-memory response cache with periodic TTL reaping.

mod entry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsReport};
pub use store::CacheStore;
pub use ttl_cache::TtlCache;

// == Public Constants ==
/// Default TTL, also the reaper sweep period
pub const DEFAULT_TTL_MS: u64 = 5_000;
