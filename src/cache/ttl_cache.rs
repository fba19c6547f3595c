//! TTL Cache Module
//!
//! Thread-safe response cache with a background reaper and explicit shutdown.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;
use crate::tasks::spawn_reaper_task;

// == TTL Cache ==
/// A bounded-staleness cache of byte blobs keyed by string.
///
/// Entries are removed by a reaper that sweeps once per `ttl`, so an entry may
/// be served for up to `2 * ttl` after it was added. Reads never expire
/// entries themselves.
///
/// The cache is not `Clone`; share it behind an `Arc`. Dropping it signals the
/// reaper to stop. Call [`TtlCache::shutdown`] to also wait for the task to
/// finish.
///
/// After shutdown the cache keeps working as a plain map: `add` and `get`
/// behave as before but nothing expires any more.
#[derive(Debug)]
pub struct TtlCache {
    /// Entries and statistics, shared with the reaper
    store: Arc<Mutex<CacheStore>>,
    /// Maximum entry age and sweep period
    ttl: Duration,
    /// Stop signal for the reaper
    shutdown_tx: watch::Sender<bool>,
    /// Reaper handle, taken on shutdown
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current runtime.
    ///
    /// # Errors
    /// - [`CacheError::InvalidTtl`] if `ttl` is zero
    /// - [`CacheError::NoRuntime`] if called outside a Tokio runtime
    pub fn new(ttl: Duration) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl(ttl));
        }
        Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let reaper = spawn_reaper_task(store.clone(), ttl, shutdown_rx);

        Ok(Self {
            store,
            ttl,
            shutdown_tx,
            reaper: Mutex::new(Some(reaper)),
        })
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.store.lock().add(key.into(), value.into());
    }

    // == Get ==
    /// Returns a copy of the value for `key`, if present.
    ///
    /// An entry past its TTL that the reaper has not swept yet is still a hit.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().get(key)
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit. Idempotent.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);

        let handle = self.reaper.lock().take();
        match handle {
            Some(handle) => {
                if let Err(err) = handle.await {
                    warn!(error = %err, "Cache reaper terminated abnormally");
                }
                debug!("Cache reaper stopped");
            }
            None => debug!("Cache already shut down"),
        }
    }

    /// Returns true while the background reaper is active.
    pub fn is_reaper_running(&self) -> bool {
        self.reaper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}
