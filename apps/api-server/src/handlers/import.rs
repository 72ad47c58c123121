//! The `import-initial-posts` function.
//!
//! Kept wire-compatible with the hosted function it replaces: the body is
//! `{pin, posts[]}` and every outcome is `{success, ...}` or `{error}`.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};

use pressroom_core::DomainError;
use pressroom_core::domain::PostImport;
use pressroom_core::ports::AuthError;
use pressroom_shared::dto::{ImportPostsRequest, ImportResponse};

use crate::state::AppState;

fn reply(status: StatusCode, body: ImportResponse) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// Body errors on this route answer `{error}` like every other outcome.
pub fn import_body_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Import rejected: unreadable body");
    let response = reply(
        StatusCode::BAD_REQUEST,
        ImportResponse::error(format!("Invalid request body: {}", err)),
    );
    InternalError::from_response(err, response).into()
}

/// POST /api/functions/import-initial-posts
pub async fn import_initial_posts(
    state: web::Data<AppState>,
    body: web::Json<ImportPostsRequest>,
) -> HttpResponse {
    let request = body.into_inner();

    match state.pins.verify_pin(&request.pin).await {
        Ok(true) => {}
        Ok(false) | Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Import rejected: invalid PIN");
            return reply(StatusCode::UNAUTHORIZED, ImportResponse::error("Invalid PIN"));
        }
        Err(AuthError::NotConfigured) => {
            return reply(
                StatusCode::SERVICE_UNAVAILABLE,
                ImportResponse::error("Admin PIN is not configured"),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Import PIN check failed");
            return reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                ImportResponse::error("Could not verify PIN"),
            );
        }
    }

    if request.posts.is_empty() {
        return reply(StatusCode::BAD_REQUEST, ImportResponse::error("No posts provided"));
    }

    let mut imports = Vec::with_capacity(request.posts.len());
    for (index, raw) in request.posts.into_iter().enumerate() {
        match serde_json::from_value::<PostImport>(raw) {
            Ok(import) => imports.push(import),
            Err(e) => {
                return reply(
                    StatusCode::BAD_REQUEST,
                    ImportResponse::error(format!("posts[{}]: {}", index, e)),
                );
            }
        }
    }

    match state.content.import_posts(imports).await {
        Ok(summary) => reply(
            StatusCode::OK,
            ImportResponse::success(summary.posts, summary.comments),
        ),
        Err(DomainError::Validation(msg)) => {
            reply(StatusCode::BAD_REQUEST, ImportResponse::error(msg))
        }
        Err(e) => {
            tracing::error!(error = %e, "Import failed");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                ImportResponse::error(e.to_string()),
            )
        }
    }
}
