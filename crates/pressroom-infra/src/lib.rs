//! # Pressroom Infrastructure
//!
//! Concrete implementations of the ports defined in `pressroom-core`:
//! repositories, the visitor cache, admin authentication and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory storage only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `rate-limit` - Rate limiting via governor

pub mod auth;
pub mod cache;
pub mod database;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, StoredPinVerifier};
pub use cache::InMemoryCache;
pub use database::{
    DatabaseConfig, InMemoryAdminAuthRepository, InMemoryReactionRepository, InMemoryRepository,
    in_memory_repositories,
};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(test)]
mod content_tests;
