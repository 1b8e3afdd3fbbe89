//! Error types for the recipe query layer
//!
//! Every fallible operation in the crate returns [`CucinaError`]. The variants
//! follow the taxonomy the cache-aside service relies on: validation and
//! not-found conditions are caller-facing, store faults abort the request, and
//! cache faults are swallowed on reads but surfaced on invalidation.

use thiserror::Error;

/// Main error type for store, cache and query operations
#[derive(Error, Debug)]
pub enum CucinaError {
    /// Malformed input, rejected before touching the store or cache
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store answered but nothing matched
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness rule was violated (recipe name, user email, like, pantry entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Primary store transport or query failure
    #[error("Store error: {0}")]
    Store(String),

    /// Cache transport failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Neo4rs driver error (wrapper)
    #[error("Neo4rs driver error: {0}")]
    Driver(#[from] neo4rs::Error),

    /// Redis client error (wrapper)
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, CucinaError>;

impl CucinaError {
    /// True for the "nothing matched" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, CucinaError::NotFound(_))
    }

    /// True for failures that originate in the cache adapter
    pub fn is_cache_error(&self) -> bool {
        matches!(self, CucinaError::Cache(_) | CucinaError::Redis(_))
    }

    /// True for failures that originate in the primary store adapter
    pub fn is_store_error(&self) -> bool {
        matches!(self, CucinaError::Store(_) | CucinaError::Driver(_))
    }
}

impl From<serde_json::Error> for CucinaError {
    fn from(e: serde_json::Error) -> Self {
        CucinaError::Serialization(e.to_string())
    }
}

impl From<String> for CucinaError {
    fn from(s: String) -> Self {
        CucinaError::Other(s)
    }
}

impl From<&str> for CucinaError {
    fn from(s: &str) -> Self {
        CucinaError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CucinaError::Validation("invalid id".to_string());
        assert_eq!(error.to_string(), "Validation error: invalid id");

        let error = CucinaError::NotFound("no recipes for cuisine".to_string());
        assert!(error.to_string().starts_with("Not found"));

        let error = CucinaError::Cache("connection refused".to_string());
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_error_classification() {
        assert!(CucinaError::NotFound("x".into()).is_not_found());
        assert!(!CucinaError::Store("x".into()).is_not_found());

        assert!(CucinaError::Cache("x".into()).is_cache_error());
        assert!(!CucinaError::Store("x".into()).is_cache_error());

        assert!(CucinaError::Store("x".into()).is_store_error());
        assert!(!CucinaError::Validation("x".into()).is_store_error());
    }

    #[test]
    fn test_error_conversion() {
        let error: CucinaError = "test error".into();
        assert!(matches!(error, CucinaError::Other(_)));

        let error: CucinaError = "test error".to_string().into();
        assert!(matches!(error, CucinaError::Other(_)));

        let parse = serde_json::from_str::<Vec<String>>("{not json");
        let error: CucinaError = parse.unwrap_err().into();
        assert!(matches!(error, CucinaError::Serialization(_)));
    }
}
