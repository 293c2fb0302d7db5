//! TTL cache for FHIR responses.
//!
//! Entries live for a fixed TTL (5 minutes in production). Expiry is lazy on
//! `get`; a background sweeper additionally evicts stale entries on an
//! interval so a quiet cache does not pin memory. The sweeper task is owned
//! by the cache and aborted when the cache is dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: String,
    inserted_at: Instant,
}

type Store = Mutex<HashMap<String, Entry>>;

/// Shared in-memory response cache.
pub struct ResponseCache {
    store: Arc<Store>,
    ttl: Duration,
    sweeper: tokio::task::JoinHandle<()>,
}

impl ResponseCache {
    /// Create a cache and start its background sweeper.
    ///
    /// Must be called within a tokio runtime. The sweeper holds only a weak
    /// reference to the store, and the task is aborted on drop, so the cache
    /// never outlives its owner.
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        let store: Arc<Store> = Arc::new(Mutex::new(HashMap::new()));
        let weak = Arc::downgrade(&store);
        let sweeper = tokio::spawn(Self::sweep_loop(weak, ttl, sweep_interval));

        Self { store, ttl, sweeper }
    }

    /// Look up a key. Expired entries are removed on access and report a miss.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        match store.get(key) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => Some(entry.value.clone()),
            Some(_) => {
                store.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value. Overwrites any existing entry and resets its TTL.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        store.insert(
            key.into(),
            Entry {
                value: value.into(),
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of live (possibly stale) entries.
    pub fn len(&self) -> usize {
        self.store.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn sweep_loop(weak: Weak<Store>, ttl: Duration, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        // First tick fires immediately; skip it so sweeps start one interval in
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let Some(store) = weak.upgrade() else {
                return;
            };
            let mut store = store.lock().unwrap_or_else(|e| e.into_inner());
            let before = store.len();
            store.retain(|_, entry| entry.inserted_at.elapsed() <= ttl);
            let evicted = before - store.len();
            if evicted > 0 {
                debug!(evicted, remaining = store.len(), "Swept expired cache entries");
            }
        }
    }
}

impl Drop for ResponseCache {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);
    const SWEEP: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl() {
        let cache = ResponseCache::new(TTL, SWEEP);
        cache.put("search_fhir_patient::url", "{}");

        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get("search_fhir_patient::url").as_deref(), Some("{}"));
    }

    #[tokio::test(start_paused = true)]
    async fn lazy_expiry_on_get() {
        let cache = ResponseCache::new(TTL, SWEEP);
        cache.put("k", "v");

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        // Sweeper may or may not have run yet; get must miss either way
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn put_resets_ttl() {
        let cache = ResponseCache::new(TTL, SWEEP);
        cache.put("k", "old");

        tokio::time::advance(Duration::from_secs(250)).await;
        cache.put("k", "new");

        tokio::time::advance(Duration::from_secs(250)).await;
        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_without_access() {
        let cache = ResponseCache::new(TTL, SWEEP);
        cache.put("k", "v");
        assert_eq!(cache.len(), 1);

        // Let the sweeper task start and register its interval timer before
        // the paused clock moves, then go past the TTL plus one sweep
        tokio::task::yield_now().await;
        tokio::time::advance(TTL + SWEEP + Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_stops_when_cache_dropped() {
        let cache = ResponseCache::new(TTL, SWEEP);
        let handle = cache.sweeper.abort_handle();
        drop(cache);
        tokio::task::yield_now().await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn distinct_keys_do_not_collide() {
        let cache = ResponseCache::new(TTL, SWEEP);
        cache.put("search_fhir_patient::a", "1");
        cache.put("search_patient_condition::a", "2");
        assert_eq!(cache.get("search_fhir_patient::a").as_deref(), Some("1"));
        assert_eq!(cache.get("search_patient_condition::a").as_deref(), Some("2"));
    }
}
