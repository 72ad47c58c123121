//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use pressroom_infra::{DatabaseConfig, JwtConfig};

#[cfg(feature = "rate-limit")]
use pressroom_infra::RateLimitConfig;

use crate::telemetry::TelemetryConfig;

/// Refresh the content snapshot every five minutes.
pub const DEFAULT_REFRESH_CRON: &str = "0 */5 * * * *";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on in-memory repositories.
    pub database: Option<DatabaseConfig>,
    /// Seeds the stored admin PIN hash at startup.
    pub admin_pin: Option<String>,
    pub jwt: JwtConfig,
    /// How long a dismissed popup stays hidden for a visitor.
    pub popup_suppression: Duration,
    /// How long bookmarks, language and reaction/vote flags outlive a visitor's last write.
    pub visitor_retention: Duration,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    pub scheduler_enabled: bool,
    pub content_refresh_cron: String,
    pub telemetry: TelemetryConfig,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            admin_pin: env::var("ADMIN_PIN").ok().filter(|p| !p.trim().is_empty()),
            jwt: JwtConfig::from_env(),
            popup_suppression: Duration::from_secs(
                parsed::<u64>("POPUP_SUPPRESS_HOURS").unwrap_or(24) * 3600,
            ),
            visitor_retention: Duration::from_secs(
                parsed::<u64>("VISITOR_STATE_TTL_DAYS").unwrap_or(90) * 86_400,
            ),
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::from_env(),
            scheduler_enabled: env::var("SCHEDULER_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            content_refresh_cron: env::var("CONTENT_REFRESH_CRON")
                .unwrap_or_else(|_| DEFAULT_REFRESH_CRON.to_string()),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}
