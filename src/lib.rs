//! Localstore - A local key-value persistence abstraction
//!
//! Exposes a tiered storage contract (basic, batch, expirable, encrypted)
//! that interchangeable backends implement, plus the backend this crate
//! owns: a bounded, concurrent, TTL-aware in-memory cache with oldest-first
//! eviction and a background expiry sweep.
//!
//! Platform backends (preferences store, secure credential store) live in
//! downstream crates and conform to the same traits; this crate defines the
//! contract surface and ships no OS plumbing.

pub mod cache;
pub mod config;
pub mod contract;
pub mod error;
pub mod tasks;

pub use cache::{CacheStatistics, MemoryCache, TypedStore};
pub use config::CacheConfig;
pub use contract::{BatchStore, EncryptedStore, ExpirableStore, KeyValueStore};
pub use error::{Result, StoreError};
pub use tasks::spawn_sweep_task;
