//! Cache-aside orchestration
//!
//! [`RecipeService`] owns both protocols:
//!
//! - **read**: probe the cache, return the stored body verbatim on a hit; on a
//!   miss query the store, score, filter by entitlement, serialize, populate
//!   the cache and return the same bytes.
//! - **write**: mutate the store, then delete every key the mutation lists.
//!
//! No lock spans probe, query and populate. Two concurrent misses on one key
//! both hit the store and write identical bytes. A populate that lands after a
//! concurrent invalidation leaves a stale entry until the next mutation of the
//! same key or until eviction.

mod read;
mod write;

use crate::cache::{CacheStore, InvalidationEvent, MemoryCache, Mutation, Origin, RedisCache};
use crate::config::{AppConfig, CacheBackend};
use crate::connection::Neo4jClient;
use crate::error::{CucinaError, Result};
use crate::health::{HealthCheckResult, HealthReport};
use crate::store::{Neo4jStore, PrimaryStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A serialized read result
///
/// `body` is exactly what the cache holds (on a hit) or what was just written
/// to it (on a miss).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<T> {
    body: String,
    origin: Origin,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Payload<T> {
    fn new(body: String, origin: Origin) -> Self {
        Self {
            body,
            origin,
            _marker: PhantomData,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_cache_hit(&self) -> bool {
        self.origin == Origin::Cache
    }
}

impl<T: DeserializeOwned> Payload<T> {
    /// Parse the body back into its typed form
    pub fn decode(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Cache-aside front for the recipe store
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn PrimaryStore>,
    cache: Arc<dyn CacheStore>,
}

impl RecipeService {
    pub fn new(store: Arc<dyn PrimaryStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self { store, cache }
    }

    /// Connect to Neo4j and the configured cache backend
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let client = Neo4jClient::connect(&config.neo4j).await?;
        let store = Neo4jStore::new(client);
        store.ensure_constraints().await?;

        let cache: Arc<dyn CacheStore> = match config.cache_backend {
            CacheBackend::Redis => Arc::new(RedisCache::connect(&config.redis_url).await?),
            CacheBackend::Memory => Arc::new(MemoryCache::new(config.cache.clone())),
        };

        info!(
            "Recipe service ready (store: {}, cache: {})",
            store.backend(),
            cache.backend()
        );
        Ok(Self::new(Arc::new(store), cache))
    }

    pub fn store(&self) -> &Arc<dyn PrimaryStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }

    /// Ping the store and the cache
    pub async fn health(&self) -> HealthReport {
        let start = Instant::now();
        let store = match self.store.ping().await {
            Ok(()) => HealthCheckResult::healthy("store", self.store.backend(), start.elapsed()),
            Err(e) => {
                error!("Store health check failed: {}", e);
                HealthCheckResult::unhealthy("store", self.store.backend(), start.elapsed(), &e.to_string())
            }
        };

        let start = Instant::now();
        let cache = match self.cache.ping().await {
            Ok(()) => HealthCheckResult::healthy("cache", self.cache.backend(), start.elapsed()),
            Err(e) => {
                warn!("Cache health check failed: {}", e);
                HealthCheckResult::unhealthy("cache", self.cache.backend(), start.elapsed(), &e.to_string())
            }
        };

        HealthReport::new(store, cache)
    }

    /// Cache probe; any cache fault reads as a miss
    async fn probe(&self, key: &str) -> Option<String> {
        match self.cache.get(key).await {
            Ok(Some(body)) => {
                debug!(key, "cache hit");
                Some(body)
            }
            Ok(None) => {
                debug!(key, "cache miss");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "cache read failed, falling back to store");
                None
            }
        }
    }

    /// Best-effort populate; failures are logged and dropped
    async fn populate(&self, key: &str, body: &str) {
        match self.cache.set(key, body.to_string()).await {
            Ok(()) => info!(key, bytes = body.len(), "cache populated"),
            Err(e) => warn!(key, error = %e, "cache write failed"),
        }
    }

    /// The read protocol for one key
    ///
    /// `load` runs only on a miss; if it fails nothing is cached.
    async fn cached<T, F, Fut>(&self, key: &str, load: F) -> Result<Payload<T>>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(body) = self.probe(key).await {
            return Ok(Payload::new(body, Origin::Cache));
        }

        let value = load().await.map_err(|e| {
            if e.is_store_error() {
                error!(key, error = %e, "store query failed");
            }
            e
        })?;

        let body = serde_json::to_string(&value)?;
        self.populate(key, &body).await;
        Ok(Payload::new(body, Origin::Store))
    }

    /// Delete every key `mutation` lists
    ///
    /// All keys are attempted even after a failure; any failure is surfaced
    /// as a `Cache` error once the pass is done.
    pub async fn invalidate(&self, mutation: Mutation) -> Result<InvalidationEvent> {
        let mut event = InvalidationEvent::new(mutation);

        for key in event.mutation.keys() {
            match self.cache.delete(&key).await {
                Ok(()) => event.keys.push(key),
                Err(e) => {
                    warn!(key = %key, error = %e, "cache invalidation failed");
                    event.failed.push(key);
                }
            }
        }

        if !event.is_complete() {
            return Err(CucinaError::Cache(format!(
                "failed to invalidate [{}] after {}",
                event.failed.join(", "),
                event.mutation
            )));
        }

        info!("Invalidated [{}] after {}", event.keys.join(", "), event.mutation);
        Ok(event)
    }
}
