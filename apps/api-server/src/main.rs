//! # Pressroom API Server
//!
//! Serves the blog, podcast, polls and contact form, plus the admin back
//! office, over Actix-web.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

#[cfg(feature = "scheduler")]
mod background;
mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::error::bad_input;
use state::AppState;
use telemetry::init_telemetry;

#[cfg(feature = "rate-limit")]
use std::{sync::Arc, time::Duration};

#[cfg(feature = "rate-limit")]
use pressroom_core::ports::RateLimiter;
#[cfg(feature = "rate-limit")]
use pressroom_infra::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "rate-limit")]
use middleware::rate_limit::RateLimitMiddleware;

#[cfg(feature = "rate-limit")]
fn build_rate_limiter(config: &RateLimitConfig) -> Option<Arc<InMemoryRateLimiter>> {
    match InMemoryRateLimiter::new(config.clone()) {
        Ok(limiter) => {
            tracing::info!(
                max_requests = config.max_requests,
                window_secs = config.window.as_secs(),
                "Rate limiting enabled"
            );
            Some(Arc::new(limiter))
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid rate limit settings, rate limiting disabled");
            None
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_telemetry(&config.telemetry);

    tracing::info!(
        host = %config.host,
        port = config.port,
        "Starting Pressroom API server"
    );

    let state = AppState::new(&config).await;

    if let Err(e) = state.content.load().await {
        tracing::error!(error = %e, "Initial content load failed; retrying on first request");
    }

    #[cfg(feature = "scheduler")]
    let mut scheduler = if config.scheduler_enabled {
        match background::start_background_jobs(&state, &config.content_refresh_cron).await {
            Ok(scheduler) => Some(scheduler),
            Err(e) => {
                tracing::error!(error = %e, "Failed to start background jobs");
                None
            }
        }
    } else {
        tracing::info!("Scheduler disabled");
        None
    };

    #[cfg(feature = "rate-limit")]
    let limiter: Option<Arc<dyn RateLimiter>> = {
        let limiter = build_rate_limiter(&config.rate_limit);
        if let Some(sweeper) = limiter.clone() {
            actix_rt::spawn(async move {
                let mut interval = actix_rt::time::interval(Duration::from_secs(600));
                loop {
                    interval.tick().await;
                    sweeper.purge_idle();
                }
            });
        }
        limiter.map(|l| l as Arc<dyn RateLimiter>)
    };

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::JsonConfig::default().error_handler(bad_input))
            .app_data(web::QueryConfig::default().error_handler(bad_input))
            .app_data(web::PathConfig::default().error_handler(bad_input))
            .configure(handlers::configure_routes);

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(RateLimitMiddleware::new(limiter.clone()));

        app.wrap(TracingLogger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    #[cfg(feature = "scheduler")]
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Scheduler did not stop cleanly");
        }
    }

    tracing::info!("Server stopped");
    server
}
