//! # Cache Layer
//!
//! Key-value cache in front of the primary store.
//!
//! ## Features
//!
//! - **No Expiry**: entries are written once and live until deleted
//! - **Deterministic Keys**: literal keys for single lookups, canonical
//!   parameter keys for multi-criteria queries
//! - **Mutation Invalidation**: each write maps to a fixed list of keys
//! - **Pluggable Backends**: Redis for shared deployments, an in-process LRU
//!   cache for tests and single-node runs
//!
//! ## Example
//!
//! ```rust
//! use cucinia_cache::cache::{keys, CacheConfig, CacheStore, MemoryCache};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cache = MemoryCache::new(CacheConfig::builder().max_entries(1_000).build());
//!
//! cache.set(&keys::recipe("42"), "{\"id\":\"42\"}".to_string()).await?;
//!
//! if let Some(value) = cache.get(&keys::recipe("42")).await? {
//!     println!("Cache hit: {}", value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entry;
pub mod invalidation;
pub mod keys;
pub mod redis;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::{CacheEntry, CacheMetadata};
pub use invalidation::{InvalidationEvent, Mutation};
pub use keys::{CacheKeyBuilder, KeyKind};
pub use self::redis::RedisCache;
pub use store::{CacheStore, MemoryCache};
pub use types::{CacheKey, CacheStats, CacheValue, Origin};
