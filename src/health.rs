//! Dependency health reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response time above which a reachable dependency counts as degraded
pub const DEGRADED_THRESHOLD_MS: u64 = 1000;

/// Status of one dependency or of the whole service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Answering, but slowly or with a dependency down
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Status code a health endpoint would answer with
    pub fn to_http_status_code(&self) -> u16 {
        if self.is_operational() {
            200
        } else {
            503
        }
    }

    /// Reads can still be served
    pub fn is_operational(&self) -> bool {
        !matches!(self, HealthStatus::Unhealthy)
    }
}

/// Result of probing one dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// `store` or `cache`
    pub dependency: String,
    /// Backend name (`neo4j`, `redis`, `memory`)
    pub backend: String,
    pub status: HealthStatus,
    pub response_time_ms: u64,
    pub error: Option<String>,
}

impl HealthCheckResult {
    pub fn healthy(dependency: &str, backend: &str, response_time: Duration) -> Self {
        let response_time_ms = response_time.as_millis() as u64;
        let status = if response_time_ms > DEGRADED_THRESHOLD_MS {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        Self {
            dependency: dependency.to_string(),
            backend: backend.to_string(),
            status,
            response_time_ms,
            error: None,
        }
    }

    pub fn unhealthy(dependency: &str, backend: &str, response_time: Duration, error: &str) -> Self {
        Self {
            dependency: dependency.to_string(),
            backend: backend.to_string(),
            status: HealthStatus::Unhealthy,
            response_time_ms: response_time.as_millis() as u64,
            error: Some(error.to_string()),
        }
    }
}

/// Health of the store and the cache
///
/// The service keeps answering reads with an unhealthy cache, so only the
/// store decides the overall status; a cache outage degrades it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub store: HealthCheckResult,
    pub cache: HealthCheckResult,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    pub fn new(store: HealthCheckResult, cache: HealthCheckResult) -> Self {
        let status = match (store.status, cache.status) {
            (HealthStatus::Unhealthy, _) => HealthStatus::Unhealthy,
            (HealthStatus::Healthy, HealthStatus::Healthy) => HealthStatus::Healthy,
            _ => HealthStatus::Degraded,
        };

        Self {
            status,
            store,
            cache,
            timestamp: Utc::now(),
        }
    }
}
