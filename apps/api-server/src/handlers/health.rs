//! Health check endpoint.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    /// When the post snapshot was last rebuilt.
    pub content_loaded_at: Option<DateTime<Utc>>,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage.as_str(),
        content_loaded_at: state.content.loaded_at().await,
        timestamp: Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
