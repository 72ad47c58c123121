//! Key/value cache port backing per-visitor state.

use async_trait::async_trait;
use std::time::Duration;

/// Cache trait - abstraction over caching backends.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a live value from the cache.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value with an optional time-to-live.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Set a value only when no live entry holds `key`.
    ///
    /// Returns true when this call stored the value. The check and the write
    /// happen as one step, so concurrent callers cannot both win.
    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, CacheError>;

    /// Delete a key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a live key exists.
    async fn exists(&self, key: &str) -> bool;

    /// Drop expired entries, returning how many were removed.
    async fn purge_expired(&self) -> usize;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Serialization failed: {0}")]
    Serialization(String),
}
