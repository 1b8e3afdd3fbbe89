//! # cucinia-cache
//!
//! Cache-aside query layer for a recipe catalogue backed by Neo4j, with Redis
//! (or an in-process LRU cache) in front.
//!
//! ## Features
//!
//! - Multi-criteria recipe matching scored by pantry overlap
//! - Premium entitlement as a cache dimension
//! - Deterministic cache keys and mutation-driven invalidation
//! - No expiry: entries leave the cache only through invalidation or eviction
//! - Pluggable store and cache adapters behind async traits
//!
//! ## Reading through the cache
//!
//! ```no_run
//! use cucinia_cache::{config::AppConfig, RecipeCriteria, RecipeService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     cucinia_cache::telemetry::init_tracing();
//!     let service = RecipeService::from_config(&AppConfig::from_env()?).await?;
//!
//!     let criteria = RecipeCriteria::new("ovo,leite")
//!         .cuisine("brasileira")
//!         .exclude("vegano");
//!     let payload = service.recipes_by_criteria(&criteria).await?;
//!
//!     println!("{} (from {})", payload.body(), payload.origin());
//!     Ok(())
//! }
//! ```
//!
//! ## In-process wiring for tests
//!
//! ```
//! use cucinia_cache::{InMemoryStore, MemoryCache, RecipeService};
//! use std::sync::Arc;
//!
//! let service = RecipeService::new(
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(MemoryCache::default()),
//! );
//! # let _ = service;
//! ```

pub mod cache;
pub mod config;
pub mod connection;
pub mod entitlement;
pub mod error;
pub mod health;
pub mod schema;
pub mod scoring;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-export main types for convenience
pub use cache::{
    CacheConfig, CacheConfigBuilder, CacheKey, CacheKeyBuilder, CacheStats, CacheStore,
    CacheValue, InvalidationEvent, MemoryCache, Mutation, Origin, RedisCache,
};
pub use config::AppConfig;
pub use connection::Neo4jClient;
pub use error::{CucinaError, Result};
pub use health::{HealthCheckResult, HealthReport, HealthStatus};
pub use schema::{Cuisine, Ingredient, Recipe, RecipeCriteria, RecipeDraft, Restriction, User};
pub use service::{Payload, RecipeService};
pub use store::{InMemoryStore, Neo4jStore, PrimaryStore, RecipeQuery};
