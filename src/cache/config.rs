//! Capacity settings for the in-process cache
//!
//! Entries never expire. They leave the cache when a mutation deletes their
//! key or when one of the limits below forces an eviction.

use crate::error::{CucinaError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;
pub const DEFAULT_MAX_BYTES: usize = 100 * 1024 * 1024;

/// Limits for [`MemoryCache`](crate::cache::MemoryCache)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry count at which the oldest entry is evicted
    pub max_entries: usize,

    /// Total payload bytes at which the oldest entries are evicted
    pub max_bytes: usize,

    /// Reads move an entry to the back of the eviction queue. When off,
    /// eviction order is insertion order.
    pub track_recency: bool,

    /// Keep `size_bytes` and `avg_entry_size` current in the stats
    pub track_sizes: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_bytes: DEFAULT_MAX_BYTES,
            track_recency: true,
            track_sizes: true,
        }
    }
}

impl CacheConfig {
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder {
            config: CacheConfig::default(),
        }
    }

    /// # Errors
    /// `Config` when either limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CucinaError::Config(
                "cache max_entries must be at least 1".to_string(),
            ));
        }
        if self.max_bytes == 0 {
            return Err(CucinaError::Config(
                "cache max_bytes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder starting from the defaults
#[derive(Debug)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = max_entries;
        self
    }

    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.config.max_bytes = max_bytes;
        self
    }

    pub fn track_recency(mut self, on: bool) -> Self {
        self.config.track_recency = on;
        self
    }

    pub fn track_sizes(mut self, on: bool) -> Self {
        self.config.track_sizes = on;
        self
    }

    pub fn build(self) -> CacheConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, DEFAULT_MAX_ENTRIES);
        assert!(config.track_recency);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = CacheConfig::builder().max_entries(0).build().validate();
        assert!(matches!(err, Err(CucinaError::Config(_))));

        let err = CacheConfig::builder().max_bytes(0).build().validate();
        assert!(matches!(err, Err(CucinaError::Config(_))));
    }

    #[test]
    fn test_builder_keeps_unset_defaults() {
        let config = CacheConfig::builder()
            .max_entries(500)
            .track_sizes(false)
            .build();

        assert_eq!(config.max_entries, 500);
        assert_eq!(config.max_bytes, DEFAULT_MAX_BYTES);
        assert!(!config.track_sizes);
        assert!(config.track_recency);
    }
}
