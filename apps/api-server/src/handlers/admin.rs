//! Admin back office. Everything except login requires [`AdminIdentity`].

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use pressroom_core::domain::{NewPodcast, NewPoll, NewPost};
use pressroom_core::ports::ADMIN_ROLE;
use pressroom_shared::ApiResponse;
use pressroom_shared::dto::{AuthResponse, LoginRequest, MessageReplyRequest};

use crate::handlers::views::PollView;
use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const ADMIN_SUBJECT: &str = "admin";

/// POST /api/admin/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    if !state.pins.verify_pin(&body.pin).await? {
        tracing::warn!("Admin login rejected");
        return Err(AppError::Unauthorized("Invalid PIN".to_string()));
    }

    let token = state
        .tokens
        .generate_token(ADMIN_SUBJECT, vec![ADMIN_ROLE.to_string()])?;

    tracing::info!("Admin session opened");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })))
}

/// GET /api/admin/stats
pub async fn stats(_admin: AdminIdentity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.content.stats(Utc::now()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

/// POST /api/admin/refresh - rebuild the content snapshot from storage.
pub async fn refresh(_admin: AdminIdentity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.content.load().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(json!({ "posts": posts }))))
}

// Posts

/// POST /api/admin/posts
pub async fn create_post(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state.content.add_post(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// PUT /api/admin/posts/{id}
pub async fn update_post(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state
        .content
        .update_post(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete_post(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.content.delete_post(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// Comments

/// DELETE /api/admin/comments/{id}
pub async fn delete_comment(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.content.delete_comment(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/admin/comments/{id}/replies/{reply_id}
pub async fn delete_reply(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (parent_id, reply_id) = path.into_inner();
    state.content.delete_reply(parent_id, reply_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// Podcasts

/// POST /api/admin/podcasts
pub async fn create_podcast(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<NewPodcast>,
) -> AppResult<HttpResponse> {
    let episode = state.content.add_podcast(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(episode)))
}

/// PUT /api/admin/podcasts/{id}
pub async fn update_podcast(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<NewPodcast>,
) -> AppResult<HttpResponse> {
    let episode = state
        .content
        .update_podcast(id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(episode)))
}

/// DELETE /api/admin/podcasts/{id}
pub async fn delete_podcast(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.content.delete_podcast(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/admin/podcast-comments/{id}
pub async fn delete_podcast_comment(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.content.delete_podcast_comment(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// Polls

/// GET /api/admin/polls - every poll, open or closed.
pub async fn list_polls(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let polls: Vec<_> = state
        .content
        .polls()
        .await?
        .into_iter()
        .map(|poll| PollView::new(poll, false))
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(polls)))
}

/// POST /api/admin/polls
pub async fn create_poll(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<NewPoll>,
) -> AppResult<HttpResponse> {
    let poll = state.content.create_poll(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(poll)))
}

/// DELETE /api/admin/polls/{id}
pub async fn delete_poll(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.content.delete_poll(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// Messages

/// GET /api/admin/messages
pub async fn list_messages(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let messages = state.content.messages().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(messages)))
}

/// POST /api/admin/messages/{id}/read
pub async fn mark_message_read(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let message = state.content.mark_message_read(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message)))
}

/// POST /api/admin/messages/{id}/reply
///
/// Stores the reply on the message. Delivering it by email is left to the
/// mail client the admin answers from.
pub async fn reply_to_message(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<MessageReplyRequest>,
) -> AppResult<HttpResponse> {
    let message = state
        .content
        .reply_to_message(id.into_inner(), &body.reply)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(message)))
}

/// DELETE /api/admin/messages/{id}
pub async fn delete_message(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.content.delete_message(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
