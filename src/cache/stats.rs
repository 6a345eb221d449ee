//! Cache Statistics Module
//!
//! Point-in-time statistics derived from the live entry set on demand.

use serde::Serialize;

// == Cache Statistics ==
/// Snapshot of cache occupancy, computed on demand and never stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStatistics {
    /// Number of entries physically present
    pub total_items: usize,
    /// Entries present and not expired
    pub valid_items: usize,
    /// Entries physically present but past their expiration
    pub expired_items: usize,
    /// Configured capacity
    pub max_entries: usize,
    /// Physical occupancy as a percentage of capacity
    pub usage_percentage: f64,
}

impl CacheStatistics {
    // == Compute ==
    /// Derives a snapshot from raw counts.
    pub fn compute(total_items: usize, expired_items: usize, max_entries: usize) -> Self {
        let usage_percentage = if max_entries == 0 {
            0.0
        } else {
            (total_items as f64 / max_entries as f64) * 100.0
        };

        Self {
            total_items,
            valid_items: total_items - expired_items,
            expired_items,
            max_entries,
            usage_percentage,
        }
    }
}
