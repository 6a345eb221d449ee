//! Cache Module
//!
//! In-memory cache engine: bounded map with TTL expiration, oldest-first
//! eviction, a concurrent async front implementing the storage contract,
//! and a typed convenience layer.

mod entry;
mod memory;
mod stats;
mod store;
mod typed;


// Re-export public types
pub use entry::CacheEntry;
pub(crate) use entry::current_timestamp_ms;
pub use memory::MemoryCache;
pub use stats::CacheStatistics;
pub use store::CacheStore;
pub use typed::TypedStore;
