//! TTL Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps expired entries out of `store`.
///
/// The first sweep happens one `ttl` after the call, then every `ttl`
/// thereafter. Each sweep holds the store lock for one full pass over the
/// entries and never across an await point.
///
/// The task stops when `true` is sent on the shutdown channel or when the
/// sender is dropped.
///
/// # Arguments
/// * `store` - Shared store, locked by callers for `add`/`get`
/// * `ttl` - Maximum entry age, also used as the sweep period
/// * `shutdown_rx` - Receiving half of the stop signal
///
/// # Panics
/// Must be called from within a Tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_reaper_task(store.clone(), Duration::from_secs(5), shutdown_rx);
/// // Later:
/// let _ = shutdown_tx.send(true);
/// handle.await?;
/// ```
pub fn spawn_reaper_task(
    store: Arc<Mutex<CacheStore>>,
    ttl: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let mut ticker = interval_at(Instant::now() + ttl, ttl);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        debug!(ttl_ms = ttl.as_millis() as u64, "Starting cache reaper");

        loop {
            tokio::select! {
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Cache reaper shutting down");
                        return;
                    }
                }
                _ = ticker.tick() => {
                    let (removed, remaining) = {
                        let mut guard = store.lock();
                        let removed = guard.reap_expired(Instant::now(), ttl);
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        info!(removed, remaining, "Cache reaper removed expired entries");
                    } else {
                        debug!(remaining, "Cache reaper found no expired entries");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(100);

    fn store_with(key: &str) -> Arc<Mutex<CacheStore>> {
        let store = Arc::new(Mutex::new(CacheStore::new()));
        store.lock().add(key.to_string(), b"value".to_vec());
        store
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_expired_entries() {
        let store = store_with("expire_soon");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_reaper_task(store.clone(), TTL, shutdown_rx);

        // Ticks at 100ms (tie, kept) and 200ms (expired)
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(store.lock().is_empty(), "Expired entry should have been reaped");
        assert_eq!(store.lock().stats().reaped, 1);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_keeps_entry_at_exact_ttl() {
        let store = store_with("boundary");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_reaper_task(store.clone(), TTL, shutdown_rx);

        // Only the 100ms tick has run, when the entry's age equals the TTL
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(store.lock().get("boundary"), Some(b"value".to_vec()));

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_preserves_fresh_entries() {
        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_reaper_task(store.clone(), TTL, shutdown_rx);

        tokio::time::sleep(Duration::from_millis(180)).await;
        store.lock().add("late".to_string(), b"value".to_vec());

        // The 200ms tick sees an entry only 20ms old
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.lock().len(), 1, "Fresh entry should not be removed");

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_reaper_stops_on_signal() {
        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_reaper_task(store, Duration::from_secs(3600), shutdown_rx);
        shutdown_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("Reaper should stop promptly")
            .unwrap();
    }

    #[tokio::test]
    async fn test_reaper_stops_when_sender_dropped() {
        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_reaper_task(store.clone(), Duration::from_secs(3600), shutdown_rx);
        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("Reaper should stop once its owner is gone")
            .unwrap();
        assert_eq!(Arc::strong_count(&store), 1);
    }
}
