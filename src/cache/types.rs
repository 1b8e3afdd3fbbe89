//! Shared cache value types

use serde::{Deserialize, Serialize};
use std::fmt;

pub type CacheKey = String;

/// Serialized JSON payload
pub type CacheValue = String;

/// Counters kept by the in-process cache
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub size_bytes: usize,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Entries removed by a delete or a clear
    pub invalidations: u64,
    pub avg_entry_size: usize,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hits as a percentage of lookups; 0 before the first lookup
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 * 100.0 / total as f64,
        }
    }

    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries ({} bytes), {} hits / {} misses ({:.1}% hit), {} evicted, {} invalidated",
            self.entries,
            self.size_bytes,
            self.hits,
            self.misses,
            self.hit_rate(),
            self.evictions,
            self.invalidations
        )
    }
}

/// Where a served payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Returned verbatim from the cache
    Cache,
    /// Computed from the primary store on a miss
    Store,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Cache => write!(f, "cache"),
            Origin::Store => write!(f, "store"),
        }
    }
}
