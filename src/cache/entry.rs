//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with expiration support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single cache entry with payload and metadata.
///
/// The payload is an opaque byte vector; typed access happens above the
/// cache in the typed convenience layer.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Store-assigned insertion counter, tiebreaker for entries created
    /// within the same millisecond
    pub seq: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with an optional absolute expiration.
    ///
    /// # Arguments
    /// * `value` - The payload to store
    /// * `seq` - Insertion sequence number assigned by the store
    /// * `expires_at` - Optional expiration (Unix milliseconds)
    pub fn new(value: Vec<u8>, seq: u64, expires_at: Option<u64>) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
            seq,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to its expiration time, so an entry stored
    /// with an expiration in the past is absent immediately.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Remaining TTL ==
    /// Returns remaining lifetime in milliseconds, or None if the entry
    /// never expires. Expired entries report 0. Useful for diagnostics.
    pub fn remaining_ttl_ms(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let now = current_timestamp_ms();
            expires.saturating_sub(now)
        })
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
