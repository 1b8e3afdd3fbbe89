//! Cache store adapter trait and the in-process implementation

use crate::cache::{
    config::CacheConfig,
    entry::CacheEntry,
    types::{CacheKey, CacheStats, CacheValue},
};
use crate::error::{CucinaError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Shared key-value cache
///
/// Values are written without expiry. Implementations are shared handles and
/// must be safe to call concurrently.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value; `Ok(None)` on a miss
    async fn get(&self, key: &str) -> Result<Option<CacheValue>>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: CacheValue) -> Result<()>;

    /// Delete a key; deleting an absent key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check connectivity
    async fn ping(&self) -> Result<()>;

    /// Short backend name for logs and health reports
    fn backend(&self) -> &'static str;
}

/// In-process cache bounded by entry count and payload bytes
///
/// Clones share the same entries. When a limit is reached the entry at the
/// front of the eviction queue goes first.
#[derive(Clone)]
pub struct MemoryCache {
    config: CacheConfig,
    inner: Arc<RwLock<Entries>>,
}

struct Entries {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Front is evicted first
    order: VecDeque<CacheKey>,
    stats: CacheStats,
    bytes: usize,
}

impl Entries {
    fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        self.bytes = self
            .bytes
            .saturating_sub(entry.metadata.size_bytes);
        self.stats.entries = self.entries.len();
        Some(entry)
    }

    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.to_string());
    }
}

impl MemoryCache {
    /// Create a new cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        info!(
            max_entries = config.max_entries,
            max_bytes = config.max_bytes,
            "memory cache ready"
        );

        let inner = Entries {
            entries: HashMap::new(),
            order: VecDeque::new(),
            stats: CacheStats::default(),
            bytes: 0,
        };

        Self {
            config,
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Presence check that leaves eviction order alone
    pub async fn contains_key(&self, key: &str) -> bool {
        self.inner.read().await.entries.contains_key(key)
    }

    /// Remove every entry
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        let count = inner.entries.len();
        inner.entries.clear();
        inner.order.clear();
        inner.bytes = 0;
        inner.stats.entries = 0;
        inner.stats.invalidations += count as u64;

        info!("Cleared {} entries from cache", count);
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    /// Evict least recently used entries until `needed_size` more bytes and
    /// one more entry fit
    fn evict_if_needed(&self, inner: &mut Entries, needed_size: usize) -> Result<()> {
        while inner.entries.len() >= self.config.max_entries {
            match inner.order.front().cloned() {
                Some(key) => {
                    debug!(key = %key, "evicting: entry limit");
                    inner.remove(&key);
                    inner.stats.evictions += 1;
                }
                None => break,
            }
        }

        while inner.bytes + needed_size > self.config.max_bytes {
            match inner.order.front().cloned() {
                Some(key) => {
                    debug!(key = %key, "evicting: byte limit");
                    inner.remove(&key);
                    inner.stats.evictions += 1;
                }
                None => {
                    warn!(needed = needed_size, "value larger than the whole cache");
                    return Err(CucinaError::Cache(format!(
                        "value of {} bytes exceeds cache capacity of {} bytes",
                        needed_size, self.config.max_bytes
                    )));
                }
            }
        }

        Ok(())
    }

    fn update_stats(&self, inner: &mut Entries) {
        inner.stats.entries = inner.entries.len();
        if self.config.track_sizes {
            inner.stats.size_bytes = inner.bytes;
            inner.stats.avg_entry_size = match inner.entries.len() {
                0 => 0,
                n => inner.bytes / n,
            };
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CacheValue>> {
        let mut inner = self.inner.write().await;

        let value = match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.mark_accessed();
                Some(entry.value.clone())
            }
            None => None,
        };

        match value {
            Some(value) => {
                inner.stats.hits += 1;
                if self.config.track_recency {
                    inner.touch(key);
                }
                debug!("Cache hit: {}", key);
                Ok(Some(value))
            }
            None => {
                inner.stats.misses += 1;
                debug!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: CacheValue) -> Result<()> {
        let entry = CacheEntry::new(key.to_string(), value);
        let size = entry.metadata.size_bytes;
        if size > self.config.max_bytes {
            warn!(key, needed = size, "value larger than the whole cache");
            return Err(CucinaError::Cache(format!(
                "value of {} bytes exceeds cache capacity of {} bytes",
                size, self.config.max_bytes
            )));
        }

        let mut inner = self.inner.write().await;

        // Replacing an entry frees its slot before eviction is considered
        inner.remove(key);
        self.evict_if_needed(&mut inner, size)?;

        inner.entries.insert(key.to_string(), entry);
        inner.order.push_back(key.to_string());
        inner.bytes += size;

        self.update_stats(&mut inner);
        debug!("Cached entry: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.remove(key).is_some() {
            inner.stats.invalidations += 1;
            self.update_stats(&mut inner);
            debug!("Removed cache entry: {}", key);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_set_and_get() {
        let cache = MemoryCache::new(CacheConfig::builder().max_entries(100).build());

        cache.set("recipes", "[]".to_string()).await.unwrap();

        let value = cache.get("recipes").await.unwrap();
        assert_eq!(value, Some("[]".to_string()));

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let cache = MemoryCache::default();

        assert_eq!(cache.get("recipe:missing").await.unwrap(), None);
        assert_eq!(cache.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let cache = MemoryCache::default();

        cache.set("users", "[1]".to_string()).await.unwrap();
        cache.set("users", "[2]".to_string()).await.unwrap();

        assert_eq!(cache.get("users").await.unwrap(), Some("[2]".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let config = CacheConfig::builder().max_entries(3).build();
        let cache = MemoryCache::new(config);

        cache.set("key1", "value1".to_string()).await.unwrap();
        cache.set("key2", "value2".to_string()).await.unwrap();
        cache.set("key3", "value3".to_string()).await.unwrap();

        // key1 becomes most recently used, so key2 is evicted next
        cache.get("key1").await.unwrap();
        cache.set("key4", "value4".to_string()).await.unwrap();

        assert!(!cache.contains_key("key2").await);
        assert!(cache.contains_key("key1").await);
        assert!(cache.contains_key("key3").await);
        assert!(cache.contains_key("key4").await);
        assert_eq!(cache.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::default();

        cache.set("recipe:1", "{}".to_string()).await.unwrap();
        cache.delete("recipe:1").await.unwrap();

        assert_eq!(cache.get("recipe:1").await.unwrap(), None);
        assert_eq!(cache.stats().await.invalidations, 1);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let cache = MemoryCache::default();
        assert!(cache.delete("nothing").await.is_ok());
        assert_eq!(cache.stats().await.invalidations, 0);
    }

    #[tokio::test]
    async fn test_value_too_large() {
        let config = CacheConfig::builder().max_bytes(8).build();
        let cache = MemoryCache::new(config);

        let err = cache.set("big", "x".repeat(64)).await.unwrap_err();
        assert!(err.is_cache_error());
    }

    #[tokio::test]
    async fn test_oversized_value_keeps_previous_entry() {
        let cache = MemoryCache::new(CacheConfig::builder().max_bytes(512).build());

        cache.set("recipes", "[]".to_string()).await.unwrap();
        let err = cache.set("recipes", "x".repeat(4096)).await.unwrap_err();
        assert!(err.is_cache_error());

        assert_eq!(cache.get("recipes").await.unwrap(), Some("[]".to_string()));
        let stats = cache.stats().await;
        assert_eq!(stats.invalidations, 0);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::default();

        cache.set("a", "1".to_string()).await.unwrap();
        cache.set("b", "2".to_string()).await.unwrap();
        cache.clear().await;

        assert!(cache.is_empty().await);
        assert_eq!(cache.stats().await.invalidations, 2);
    }

    #[tokio::test]
    async fn test_stats_track_size() {
        let cache = MemoryCache::default();

        cache.set("key1", "value1".to_string()).await.unwrap();
        cache.get("key1").await.unwrap();
        cache.get("nonexistent").await.unwrap();

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert!(stats.size_bytes > 0);
        assert_eq!(stats.avg_entry_size, stats.size_bytes);
    }
}
