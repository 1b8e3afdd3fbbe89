//! Stored entries of the in-process cache

use crate::cache::types::{CacheKey, CacheValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed bookkeeping cost charged to every entry on top of key and value
const ENTRY_OVERHEAD: usize = std::mem::size_of::<CacheMetadata>();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    /// Serialized payload, returned byte-for-byte on a hit
    pub value: CacheValue,
    pub metadata: CacheMetadata,
}

/// Write time, read bookkeeping and charged size of one entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub created_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
    /// Hits served from this entry
    pub access_count: u64,
    pub size_bytes: usize,
}

impl CacheEntry {
    pub fn new(key: CacheKey, value: CacheValue) -> Self {
        let now = Utc::now();
        let size_bytes = key.len() + value.len() + ENTRY_OVERHEAD;
        Self {
            key,
            value,
            metadata: CacheMetadata {
                created_at: now,
                accessed_at: now,
                access_count: 0,
                size_bytes,
            },
        }
    }

    /// Record a hit
    pub fn mark_accessed(&mut self) {
        self.metadata.accessed_at = Utc::now();
        self.metadata.access_count += 1;
    }

    /// Time since the entry was written
    pub fn age(&self) -> Duration {
        (Utc::now() - self.metadata.created_at)
            .to_std()
            .unwrap_or_default()
    }

    /// Bytes charged against the cache's byte limit
    pub fn calculate_size(&self) -> usize {
        self.key.len() + self.value.len() + ENTRY_OVERHEAD
    }
}
