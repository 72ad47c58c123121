//! Podcast episodes and listener comments.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use pressroom_core::domain::NewComment;
use pressroom_shared::ApiResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/podcasts
pub async fn list_podcasts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let episodes = state.content.podcasts().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(episodes)))
}

/// GET /api/podcasts/{id}
pub async fn get_podcast(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let episode = state.content.podcast(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(episode)))
}

/// POST /api/podcasts/{id}/comments
pub async fn add_podcast_comment(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    let comment = state
        .content
        .add_podcast_comment(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(comment)))
}
