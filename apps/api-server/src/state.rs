//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use pressroom_core::ports::{AdminAuthRepository, Cache, PinVerifier, TokenService};
use pressroom_core::services::{ContentRepositories, ContentStore, VisitorState};
use pressroom_infra::{
    Argon2PasswordService, InMemoryAdminAuthRepository, InMemoryCache, JwtConfig,
    JwtTokenService, StoredPinVerifier, in_memory_repositories,
};

#[cfg(feature = "postgres")]
use pressroom_infra::database::{
    PostgresAdminAuthRepository, PostgresCommentRepository, PostgresMessageRepository,
    PostgresPodcastCommentRepository, PostgresPodcastRepository, PostgresPollRepository,
    PostgresPostRepository, PostgresReactionRepository, connect,
};

use crate::config::AppConfig;

/// Which backend holds the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore>,
    pub visitors: Arc<VisitorState>,
    pub cache: Arc<dyn Cache>,
    pub tokens: Arc<dyn TokenService>,
    pub pins: Arc<dyn PinVerifier>,
    pub storage: Storage,
}

struct Backend {
    repos: ContentRepositories,
    admin: Arc<dyn AdminAuthRepository>,
    storage: Storage,
}

fn in_memory_backend() -> Backend {
    Backend {
        repos: in_memory_repositories(),
        admin: Arc::new(InMemoryAdminAuthRepository::new()),
        storage: Storage::Memory,
    }
}

impl AppState {
    /// Build the application state, falling back to in-memory storage when
    /// no database is configured or it cannot be reached.
    pub async fn new(config: &AppConfig) -> Self {
        let backend = Self::backend(config).await;
        let (state, pins) = Self::assemble(
            backend,
            config.jwt.clone(),
            config.popup_suppression,
            config.visitor_retention,
        );

        match &config.admin_pin {
            Some(pin) => match pins.ensure_pin(pin).await {
                Ok(()) => tracing::info!("Admin PIN configured"),
                Err(e) => tracing::error!(error = %e, "Failed to store admin PIN"),
            },
            None => tracing::warn!("ADMIN_PIN not set. Using the stored PIN, if any."),
        }

        tracing::info!(storage = state.storage.as_str(), "Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    async fn backend(config: &AppConfig) -> Backend {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return in_memory_backend();
        };

        match connect(db_config).await {
            Ok(db) => Backend {
                repos: ContentRepositories {
                    posts: Arc::new(PostgresPostRepository::new(db.clone())),
                    comments: Arc::new(PostgresCommentRepository::new(db.clone())),
                    reactions: Arc::new(PostgresReactionRepository::new(db.clone())),
                    podcasts: Arc::new(PostgresPodcastRepository::new(db.clone())),
                    podcast_comments: Arc::new(PostgresPodcastCommentRepository::new(db.clone())),
                    polls: Arc::new(PostgresPollRepository::new(db.clone())),
                    messages: Arc::new(PostgresMessageRepository::new(db.clone())),
                },
                admin: Arc::new(PostgresAdminAuthRepository::new(db)),
                storage: Storage::Postgres,
            },
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to connect to database. Using in-memory fallback."
                );
                in_memory_backend()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn backend(_config: &AppConfig) -> Backend {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        in_memory_backend()
    }

    fn assemble(
        backend: Backend,
        jwt: JwtConfig,
        popup_suppression: Duration,
        visitor_retention: Duration,
    ) -> (Self, Arc<StoredPinVerifier>) {
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
        let pins = Arc::new(StoredPinVerifier::new(
            backend.admin,
            Arc::new(Argon2PasswordService::new()),
        ));

        let state = Self {
            content: Arc::new(ContentStore::new(backend.repos)),
            visitors: Arc::new(VisitorState::new(
                cache.clone(),
                popup_suppression,
                visitor_retention,
            )),
            cache,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            pins: pins.clone(),
            storage: backend.storage,
        };
        (state, pins)
    }

    /// In-memory state with `pin` as the admin PIN.
    #[cfg(test)]
    pub async fn for_tests(pin: &str) -> Self {
        let jwt = JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "pressroom-test".to_string(),
        };
        let (state, pins) = Self::assemble(
            in_memory_backend(),
            jwt,
            Duration::from_secs(3600),
            Duration::from_secs(86_400),
        );
        if let Err(e) = pins.set_pin(pin).await {
            panic!("test PIN rejected: {e}");
        }
        state
    }
}
