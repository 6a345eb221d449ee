//! Memory Cache Module
//!
//! Concurrent front for the cache core. Wraps [`CacheStore`] in
//! `Arc<RwLock<..>>` and implements the basic, batch and expirable tiers of
//! the storage contract. The encrypted tier is deliberately not implemented
//! here; it belongs to the secure credential backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{current_timestamp_ms, CacheStatistics, CacheStore};
use crate::config::CacheConfig;
use crate::contract::{BatchStore, ExpirableStore, KeyValueStore};
use crate::error::Result;
use crate::tasks::spawn_sweep_task;

// == Memory Cache ==
/// Bounded, TTL-aware in-memory backend.
///
/// All writers (including `retrieve`, whose lazy expiry can delete) take
/// the write lock; `exists` and `statistics` take the read lock and may run
/// concurrently. A background sweep task is spawned at construction and
/// aborted on [`MemoryCache::shutdown`] or drop.
#[derive(Debug)]
pub struct MemoryCache {
    /// Shared cache core
    store: Arc<RwLock<CacheStore>>,
    /// Handle for the background sweep task
    sweep_handle: JoinHandle<()>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates a new MemoryCache and starts its background sweep task.
    pub fn new(config: &CacheConfig) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new(config.max_entries)));
        let sweep_handle = spawn_sweep_task(store.clone(), config.sweep_interval);

        Self {
            store,
            sweep_handle,
        }
    }

    /// Creates a MemoryCache with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(&CacheConfig::default())
    }

    // == Statistics ==
    /// Computes a point-in-time statistics snapshot.
    pub async fn statistics(&self) -> CacheStatistics {
        self.store.read().await.statistics()
    }

    /// Returns the number of physically present entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    // == Shutdown ==
    /// Cancels the background sweep task.
    ///
    /// A pass already holding the lock finishes its scan-and-delete; no
    /// further passes are scheduled. Idempotent.
    pub fn shutdown(&self) {
        self.sweep_handle.abort();
    }

    /// Whether the sweep task has stopped running.
    pub fn sweep_finished(&self) -> bool {
        self.sweep_handle.is_finished()
    }
}

impl Drop for MemoryCache {
    fn drop(&mut self) {
        // A dropped cache must not leave the sweep ticking
        self.sweep_handle.abort();
    }
}

// == Basic Tier ==
#[async_trait]
impl KeyValueStore for MemoryCache {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let started = Instant::now();
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value, None);
        debug!("store: key={} elapsed={:?}", key, started.elapsed());
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let started = Instant::now();
        // Write lock: lazy expiry may delete the entry
        let mut store = self.store.write().await;
        let value = store.get(key);
        debug!(
            "retrieve: key={} hit={} elapsed={:?}",
            key,
            value.is_some(),
            started.elapsed()
        );
        Ok(value)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let mut store = self.store.write().await;
        let removed = store.delete(key);
        debug!("remove: key={} removed={}", key, removed);
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        let mut store = self.store.write().await;
        store.clear();
        debug!("clear: cache emptied");
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let store = self.store.read().await;
        Ok(store.contains(key))
    }
}

// == Batch Tier ==
#[async_trait]
impl BatchStore for MemoryCache {
    async fn store_batch(&self, items: HashMap<String, Vec<u8>>) -> Result<()> {
        let started = Instant::now();
        let count = items.len();
        let mut store = self.store.write().await;
        store.insert_batch(items);
        debug!("store_batch: count={} elapsed={:?}", count, started.elapsed());
        Ok(())
    }

    async fn retrieve_batch(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>> {
        let started = Instant::now();
        let mut store = self.store.write().await;
        let found = store.get_batch(keys);
        debug!(
            "retrieve_batch: requested={} found={} elapsed={:?}",
            keys.len(),
            found.len(),
            started.elapsed()
        );
        Ok(found)
    }

    async fn remove_batch(&self, keys: &[String]) -> Result<()> {
        let mut store = self.store.write().await;
        let removed = store.delete_batch(keys);
        debug!("remove_batch: requested={} removed={}", keys.len(), removed);
        Ok(())
    }
}

// == Expirable Tier ==
#[async_trait]
impl ExpirableStore for MemoryCache {
    async fn store_with_expiration(
        &self,
        key: &str,
        value: Vec<u8>,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let expires_ms = expires_at.timestamp_millis().max(0) as u64;
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value, Some(expires_ms));
        debug!("store_with_expiration: key={} expires_at={}", key, expires_at);
        Ok(())
    }

    async fn store_with_ttl(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let expires_ms = current_timestamp_ms() + ttl.as_millis() as u64;
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value, Some(expires_ms));
        debug!("store_with_ttl: key={} ttl={:?}", key, ttl);
        Ok(())
    }

    async fn retrieve_valid(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // `retrieve` already treats expired entries as absent
        self.retrieve(key).await
    }

    async fn remove_expired(&self) -> Result<usize> {
        let mut store = self.store.write().await;
        let removed = store.remove_expired();
        debug!("remove_expired: purged={}", removed);
        Ok(removed)
    }
}
