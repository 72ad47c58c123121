//! Content storage: PostgreSQL repositories and the in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryAdminAuthRepository, InMemoryReactionRepository, InMemoryRepository,
    in_memory_repositories,
};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_base::PostgresBaseRepository;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresAdminAuthRepository, PostgresCommentRepository, PostgresMessageRepository,
    PostgresPodcastCommentRepository, PostgresPodcastRepository, PostgresPollRepository,
    PostgresPostRepository, PostgresReactionRepository,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
