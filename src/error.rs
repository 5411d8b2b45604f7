//! Error types for the cache backends
//!
//! Provides unified error handling using thiserror. A missing or expired key
//! is never an error; these variants are reserved for genuine backend faults.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for every cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No tokio runtime was available to host the background sweeper
    #[error("Runtime unavailable: {0}")]
    Runtime(String),

    /// The background sweeper failed while shutting down
    #[error("Sweeper failed: {0}")]
    Sweeper(String),

    /// Failure talking to the Redis server
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::Runtime("no reactor".to_string()).to_string(),
            "Runtime unavailable: no reactor"
        );
        assert_eq!(
            CacheError::Sweeper("panicked".to_string()).to_string(),
            "Sweeper failed: panicked"
        );
    }
}
