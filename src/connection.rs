//! Neo4j connection management

use crate::config::Neo4jConfig;
use crate::error::{CucinaError, Result};
use neo4rs::{query, ConfigBuilder, Graph};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Pooled Neo4j client
#[derive(Clone)]
pub struct Neo4jClient {
    graph: Graph,
}

impl Neo4jClient {
    /// Connect with the given settings
    ///
    /// # Example
    /// ```no_run
    /// use cucinia_cache::{config::Neo4jConfig, Neo4jClient};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let client = Neo4jClient::connect(&Neo4jConfig::default()).await?;
    ///     client.ping().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(settings: &Neo4jConfig) -> Result<Self> {
        info!(
            "Connecting to Neo4j at {} (database: {})",
            settings.uri, settings.database
        );

        let config = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str())
            .db(settings.database.as_str())
            .fetch_size(settings.fetch_size)
            .max_connections(settings.max_connections)
            .build()
            .map_err(|e| CucinaError::Config(e.to_string()))?;

        let graph = Graph::connect(config)
            .await
            .map_err(|e| CucinaError::Store(format!("connection failed: {}", e)))?;

        info!("Successfully connected to Neo4j");
        Ok(Self { graph })
    }

    /// Round-trip `RETURN 1` and report how long it took
    pub async fn ping(&self) -> Result<Duration> {
        debug!("Executing health check (RETURN 1)");
        let start = Instant::now();

        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| CucinaError::Store(e.to_string()))?;

        Ok(start.elapsed())
    }

    /// Underlying neo4rs graph handle
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}
