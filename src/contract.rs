//! Storage Contract Module
//!
//! Capability traits implemented polymorphically by all storage backends.
//! Each backend implements only the tiers it supports: the in-memory cache
//! implements the basic, batch and expirable tiers; the secure credential
//! backend additionally implements the encrypted tier; the preferences
//! backend implements only the basic tier.
//!
//! Callers program against `Arc<dyn KeyValueStore>` (or a richer tier) and
//! never against a concrete backend.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

// == Basic Tier ==
/// Core key-value operations every backend must support.
///
/// Values are opaque byte payloads; typed access is layered on top via
/// [`crate::cache::TypedStore`]. Absence of a key is a normal outcome
/// (`Ok(None)` / `Ok(false)`), never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stores a value under the given key, overwriting any previous value.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Retrieves the value for a key, or `None` if absent or expired.
    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Removes a key. Returns whether something was removed; removing an
    /// absent key is not an error.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Removes every entry unconditionally.
    async fn clear(&self) -> Result<()>;

    /// True iff the key is present and not expired. Side-effect-free.
    async fn exists(&self, key: &str) -> Result<bool>;
}

// == Batch Tier ==
/// Multi-key operations layered on the basic tier.
#[async_trait]
pub trait BatchStore: KeyValueStore {
    /// Stores all items. Each key is written independently after a single
    /// eviction pass; per-key all-or-nothing is not guaranteed.
    async fn store_batch(&self, items: HashMap<String, Vec<u8>>) -> Result<()>;

    /// Returns the subset of requested keys that are present and unexpired.
    /// Missing and expired keys are silently omitted.
    async fn retrieve_batch(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>>;

    /// Removes every requested key that is present; absent keys are ignored.
    async fn remove_batch(&self, keys: &[String]) -> Result<()>;
}

// == Expirable Tier ==
/// Expiration-aware operations layered on the basic tier.
#[async_trait]
pub trait ExpirableStore: KeyValueStore {
    /// Stores a value that expires at the given absolute time.
    async fn store_with_expiration(
        &self,
        key: &str,
        value: Vec<u8>,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Stores a value that expires `ttl` from now.
    async fn store_with_ttl(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Retrieves the value only if present and unexpired.
    async fn retrieve_valid(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Eagerly purges expired entries, returning the count removed.
    async fn remove_expired(&self) -> Result<usize>;
}

// == Encrypted Tier ==
/// Encrypted storage operations.
///
/// Implemented only by the secure credential backend, which delegates
/// encryption entirely to the OS. The in-memory cache does not implement
/// this tier.
#[async_trait]
pub trait EncryptedStore: KeyValueStore {
    /// Stores a value through the backend's encryption facility.
    async fn store_encrypted(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Retrieves and decrypts a value, or `None` if absent.
    async fn retrieve_decrypted(&self, key: &str) -> Result<Option<Vec<u8>>>;
}
