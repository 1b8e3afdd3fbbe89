//! Redis-backed cache store

use crate::cache::store::CacheStore;
use crate::cache::types::CacheValue;
use crate::error::{CucinaError, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

/// Cache adapter over a shared Redis connection
///
/// Keys are written with plain `SET` and no expiry. The connection manager
/// reconnects on its own, so the handle is cloned per command.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Open a managed connection to `url`
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Redis at {}", url);

        let client = redis::Client::open(url)
            .map_err(|e| CucinaError::Config(format!("invalid Redis URL '{}': {}", url, e)))?;
        let conn = client.get_connection_manager().await?;

        info!("Redis connection established");
        Ok(Self { conn })
    }

    pub fn from_manager(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<CacheValue>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        debug!(key, hit = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: CacheValue) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;
        debug!(key, "redis SET");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        debug!(key, "redis DEL");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong != "PONG" {
            return Err(CucinaError::Cache(format!(
                "unexpected PING reply: {}",
                pong
            )));
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
