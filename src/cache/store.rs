//! Cache Store Module
//!
//! Synchronous cache core combining HashMap storage with oldest-first
//! eviction and TTL expiration. Concurrency discipline lives in the async
//! wrapper ([`crate::cache::MemoryCache`]); this type holds the semantics.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStatistics};

// == Cache Store ==
/// Bounded key-value storage with oldest-first eviction and TTL support.
///
/// Eviction is ordered by entry creation time, not access recency: reads
/// never touch entry metadata, which keeps them allocation-free.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Monotonic insertion counter, tiebreaker for same-millisecond entries
    next_seq: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the specified capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            next_seq: 0,
        }
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // == Insert ==
    /// Stores a payload under a key with an optional absolute expiration
    /// (Unix milliseconds).
    ///
    /// If the key already exists the entry is replaced. If the cache is at
    /// capacity, the oldest entries are evicted down to `max_entries / 2`
    /// before the insert, so insertion always succeeds.
    pub fn insert(&mut self, key: String, value: Vec<u8>, expires_at: Option<u64>) {
        if self.entries.len() >= self.max_entries {
            self.evict_to(self.max_entries / 2);
        }

        let seq = self.take_seq();
        self.entries.insert(key, CacheEntry::new(value, seq, expires_at));
    }

    // == Get ==
    /// Retrieves the payload for a key.
    ///
    /// Expired entries are removed as a side effect and reported absent.
    /// A missing key is a normal `None`, not an error.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let expired = matches!(self.entries.get(key), Some(entry) if entry.is_expired());
        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether something was removed;
    /// deleting an absent key is not an error.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Empties the entire cache unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Contains ==
    /// True iff the key is present and not expired.
    ///
    /// Unlike `get`, this never mutates: an expired entry stays physically
    /// present until the next retrieval or sweep. The asymmetry is
    /// intentional so existence checks stay read-only.
    pub fn contains(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) => !entry.is_expired(),
            None => false,
        }
    }

    // == Insert Batch ==
    /// Stores all items with no expiration.
    ///
    /// Runs a single eviction pass first: if the incoming N keys would push
    /// the count past capacity, the oldest entries are evicted down to
    /// `max_entries - N` (floored at zero). Each key is then written
    /// independently.
    pub fn insert_batch(&mut self, items: HashMap<String, Vec<u8>>) {
        let incoming = items.len();
        if self.entries.len() + incoming > self.max_entries {
            self.evict_to(self.max_entries.saturating_sub(incoming));
        }

        for (key, value) in items {
            let seq = self.take_seq();
            self.entries.insert(key, CacheEntry::new(value, seq, None));
        }
    }

    // == Get Batch ==
    /// Retrieves the subset of requested keys that are present and
    /// unexpired. Missing and expired keys are silently omitted; expired
    /// entries encountered here are removed like in `get`.
    pub fn get_batch(&mut self, keys: &[String]) -> HashMap<String, Vec<u8>> {
        let mut found = HashMap::new();
        for key in keys {
            if let Some(value) = self.get(key) {
                found.insert(key.clone(), value);
            }
        }
        found
    }

    // == Delete Batch ==
    /// Removes every requested key that is present, ignoring the rest.
    /// Returns the number of entries removed.
    pub fn delete_batch(&mut self, keys: &[String]) -> usize {
        keys.iter().filter(|key| self.delete(key)).count()
    }

    // == Evict ==
    /// Evicts oldest-first down to `target` entries.
    ///
    /// Entries are ordered ascending by `(created_at, seq)` and the oldest
    /// `len - target` are dropped. Returns the number evicted.
    pub fn evict_to(&mut self, target: usize) -> usize {
        if self.entries.len() <= target {
            return 0;
        }

        let mut by_age: Vec<(String, u64, u64)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.created_at, entry.seq))
            .collect();
        by_age.sort_by_key(|(_, created_at, seq)| (*created_at, *seq));

        let surplus = self.entries.len() - target;
        for (key, _, _) in by_age.into_iter().take(surplus) {
            self.entries.remove(&key);
        }
        surplus
    }

    // == Remove Expired ==
    /// Eagerly removes all expired entries from the cache.
    ///
    /// Returns the number of entries purged.
    pub fn remove_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
        }
        count
    }

    // == Statistics ==
    /// Computes a statistics snapshot from the live entry set.
    pub fn statistics(&self) -> CacheStatistics {
        let total_items = self.entries.len();
        let expired_items = self
            .entries
            .values()
            .filter(|entry| entry.is_expired())
            .count();

        CacheStatistics::compute(total_items, expired_items, self.max_entries)
    }

    // == Length ==
    /// Returns the current number of physically present entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured capacity.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Test-only direct insertion with explicit timestamps.
    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::current_timestamp_ms;

    fn expired_entry(seq: u64) -> CacheEntry {
        CacheEntry {
            value: b"stale".to_vec(),
            created_at: current_timestamp_ms().saturating_sub(2000),
            seq,
            expires_at: Some(current_timestamp_ms().saturating_sub(1000)),
        }
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_entries(), 100);
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = CacheStore::new(100);

        store.insert("key1".to_string(), b"value1".to_vec(), None);
        let value = store.get("key1");

        assert_eq!(value, Some(b"value1".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(100);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_delete() {
        let mut store = CacheStore::new(100);

        store.insert("key1".to_string(), b"value1".to_vec(), None);
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent_is_idempotent() {
        let mut store = CacheStore::new(100);
        assert!(!store.delete("nonexistent"));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);

        store.insert("key1".to_string(), b"value1".to_vec(), None);
        store.insert("key1".to_string(), b"value2".to_vec(), None);

        assert_eq!(store.get("key1"), Some(b"value2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new(100);

        store.insert("key1".to_string(), b"value1".to_vec(), None);
        store.insert("key2".to_string(), b"value2".to_vec(), None);
        store.clear();

        assert!(store.is_empty());
    }

    #[test]
    fn test_store_lazy_expiry_removes_on_get() {
        let mut store = CacheStore::new(100);
        store.insert_raw("stale".to_string(), expired_entry(0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("stale"), None);
        // Retrieval physically removed the expired entry
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_contains_does_not_mutate() {
        let mut store = CacheStore::new(100);
        store.insert_raw("stale".to_string(), expired_entry(0));

        assert!(!store.contains("stale"));
        // Entry stays physically present after the existence check
        assert_eq!(store.len(), 1);
        assert!(!store.contains("missing"));
    }

    #[test]
    fn test_store_eviction_halves_on_overflow() {
        let mut store = CacheStore::new(3);

        store.insert("k1".to_string(), b"v1".to_vec(), None);
        store.insert("k2".to_string(), b"v2".to_vec(), None);
        store.insert("k3".to_string(), b"v3".to_vec(), None);

        // At capacity: inserting k4 first evicts down to max/2 = 1, so the
        // two oldest (k1, k2) go and {k3, k4} remain.
        store.insert("k4".to_string(), b"v4".to_vec(), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("k1"), None);
        assert_eq!(store.get("k2"), None);
        assert_eq!(store.get("k3"), Some(b"v3".to_vec()));
        assert_eq!(store.get("k4"), Some(b"v4".to_vec()));
    }

    #[test]
    fn test_store_capacity_invariant_under_many_inserts() {
        let mut store = CacheStore::new(10);

        for i in 0..35 {
            store.insert(format!("key{}", i), vec![i as u8], None);
            assert!(store.len() <= 10, "capacity exceeded at insert {}", i);
        }
    }

    #[test]
    fn test_store_insert_batch_evicts_to_make_room() {
        let mut store = CacheStore::new(4);

        store.insert("old1".to_string(), b"v".to_vec(), None);
        store.insert("old2".to_string(), b"v".to_vec(), None);
        store.insert("old3".to_string(), b"v".to_vec(), None);

        let mut batch = HashMap::new();
        batch.insert("new1".to_string(), b"n1".to_vec());
        batch.insert("new2".to_string(), b"n2".to_vec());
        batch.insert("new3".to_string(), b"n3".to_vec());
        store.insert_batch(batch);

        // Target retained count = 4 - 3 = 1, so old1 and old2 were evicted
        assert_eq!(store.len(), 4);
        assert_eq!(store.get("old1"), None);
        assert_eq!(store.get("old2"), None);
        assert!(store.contains("old3"));
        assert!(store.contains("new1"));
        assert!(store.contains("new2"));
        assert!(store.contains("new3"));
    }

    #[test]
    fn test_store_get_batch_returns_valid_subset() {
        let mut store = CacheStore::new(100);

        store.insert("live1".to_string(), b"a".to_vec(), None);
        store.insert("live2".to_string(), b"b".to_vec(), None);
        store.insert_raw("stale".to_string(), expired_entry(99));

        let keys = vec![
            "live1".to_string(),
            "live2".to_string(),
            "stale".to_string(),
            "missing".to_string(),
        ];
        let found = store.get_batch(&keys);

        assert_eq!(found.len(), 2);
        assert_eq!(found.get("live1"), Some(&b"a".to_vec()));
        assert_eq!(found.get("live2"), Some(&b"b".to_vec()));
    }

    #[test]
    fn test_store_delete_batch_ignores_missing() {
        let mut store = CacheStore::new(100);

        store.insert("key1".to_string(), b"v".to_vec(), None);
        store.insert("key2".to_string(), b"v".to_vec(), None);

        let removed = store.delete_batch(&[
            "key1".to_string(),
            "missing".to_string(),
            "key2".to_string(),
        ]);

        assert_eq!(removed, 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_remove_expired_counts_exactly() {
        let mut store = CacheStore::new(100);

        store.insert("live".to_string(), b"v".to_vec(), None);
        store.insert_raw("stale1".to_string(), expired_entry(10));
        store.insert_raw("stale2".to_string(), expired_entry(11));

        let removed = store.remove_expired();

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert!(store.contains("live"));
    }

    #[test]
    fn test_store_remove_expired_empty_cache() {
        let mut store = CacheStore::new(100);
        assert_eq!(store.remove_expired(), 0);
    }

    #[test]
    fn test_store_eviction_order_breaks_timestamp_ties() {
        let mut store = CacheStore::new(100);
        let now = current_timestamp_ms();

        // All four share a creation millisecond; seq decides age.
        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            store.insert_raw(
                key.to_string(),
                CacheEntry {
                    value: b"v".to_vec(),
                    created_at: now,
                    seq: i as u64,
                    expires_at: None,
                },
            );
        }

        let evicted = store.evict_to(2);
        assert_eq!(evicted, 2);
        assert!(!store.contains("a"));
        assert!(!store.contains("b"));
        assert!(store.contains("c"));
        assert!(store.contains("d"));
    }

    #[test]
    fn test_store_statistics_snapshot() {
        let mut store = CacheStore::new(10);

        store.insert("live".to_string(), b"v".to_vec(), None);
        store.insert_raw("stale".to_string(), expired_entry(50));

        let stats = store.statistics();
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.valid_items, 1);
        assert_eq!(stats.expired_items, 1);
        assert_eq!(stats.max_entries, 10);
        assert!((stats.usage_percentage - 20.0).abs() < f64::EPSILON);
    }
}
