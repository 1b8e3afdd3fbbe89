//! Application configuration loaded from the environment
//!
//! `.env` is read through `dotenv` first; real environment variables win over
//! file entries. Every value has a local-development default.

use crate::cache::CacheConfig;
use crate::error::{CucinaError, Result};
use std::str::FromStr;

pub const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Connection settings for the primary store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
    pub fetch_size: usize,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_NEO4J_URI.to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            database: "neo4j".to_string(),
            max_connections: 16,
            fetch_size: 500,
        }
    }
}

/// Which cache adapter to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl FromStr for CacheBackend {
    type Err = CucinaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(CucinaError::Config(format!(
                "unknown cache backend '{}' (expected redis or memory)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub neo4j: Neo4jConfig,
    pub redis_url: String,
    pub cache_backend: CacheBackend,
    /// Used only by the in-process backend
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            neo4j: Neo4jConfig::default(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            cache_backend: CacheBackend::Redis,
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let neo4j = Neo4jConfig {
            uri: get("NEO4J_URI", &defaults.neo4j.uri),
            user: get("NEO4J_USER", &defaults.neo4j.user),
            password: get("NEO4J_PASSWORD", &defaults.neo4j.password),
            database: get("NEO4J_DATABASE", &defaults.neo4j.database),
            max_connections: parse_number(
                "NEO4J_MAX_CONNECTIONS",
                lookup("NEO4J_MAX_CONNECTIONS"),
                defaults.neo4j.max_connections,
            )?,
            fetch_size: defaults.neo4j.fetch_size,
        };

        let cache_backend = match lookup("CUCINIA_CACHE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.cache_backend,
        };

        let cache = CacheConfig::builder()
            .max_entries(parse_number(
                "CUCINIA_CACHE_MAX_ENTRIES",
                lookup("CUCINIA_CACHE_MAX_ENTRIES"),
                defaults.cache.max_entries,
            )?)
            .build();
        cache.validate()?;

        Ok(Self {
            neo4j,
            redis_url: get("REDIS_URL", &defaults.redis_url),
            cache_backend,
            cache,
        })
    }
}

fn parse_number(name: &str, raw: Option<String>, default: usize) -> Result<usize> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            CucinaError::Config(format!("{} must be a positive integer, got '{}'", name, raw))
        }),
    }
}
