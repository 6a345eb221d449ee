//! Typed Store Module
//!
//! Serialization convenience layer over any basic-tier backend. A pure
//! transform: serde_json at the boundary, no locking of its own.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::contract::KeyValueStore;
use crate::error::{Result, StoreError};

// == Typed Store ==
/// Wraps a backend and stores structured values as JSON payloads.
///
/// Encoding and decoding failures are tagged with the offending key;
/// everything else passes straight through to the backend.
#[derive(Debug)]
pub struct TypedStore<S> {
    inner: S,
}

impl<S: KeyValueStore> TypedStore<S> {
    // == Constructor ==
    /// Wraps a backend in the typed layer.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Access to the underlying backend.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    // == Store ==
    /// Serializes and stores a value under the given key.
    pub async fn store<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let payload =
            serde_json::to_vec(value).map_err(|_| StoreError::EncodingFailed(key.to_string()))?;
        self.inner.store(key, payload).await
    }

    // == Retrieve ==
    /// Retrieves and deserializes the value for a key, or `None` if absent.
    pub async fn retrieve<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.inner.retrieve(key).await? {
            Some(payload) => serde_json::from_slice(&payload)
                .map(Some)
                .map_err(|_| StoreError::DecodingFailed(key.to_string())),
            None => Ok(None),
        }
    }

    // == Pass-through Operations ==
    /// Removes a key. Returns whether something was removed.
    pub async fn remove(&self, key: &str) -> Result<bool> {
        self.inner.remove(key).await
    }

    /// Removes every entry unconditionally.
    pub async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }

    /// True iff the key is present and not expired.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        self.inner.exists(key).await
    }
}
