//! Comments, replies, comment votes and post reactions.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;

use pressroom_core::domain::{CommentVote, NewComment, ReactionCounts, ReactionKind};
use pressroom_shared::ApiResponse;
use pressroom_shared::dto::ReactionRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::visitor::VisitorId;
use crate::state::AppState;

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
    body: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    let comment = state
        .content
        .add_comment(post_id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(comment)))
}

/// POST /api/comments/{id}/replies
pub async fn add_reply(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    body: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    let reply = state
        .content
        .add_reply(comment_id.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(reply)))
}

/// POST /api/comments/{id}/like
pub async fn like_comment(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .content
        .rate_comment(comment_id.into_inner(), CommentVote::Like)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment)))
}

/// POST /api/comments/{id}/dislike
pub async fn dislike_comment(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .content
        .rate_comment(comment_id.into_inner(), CommentVote::Dislike)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment)))
}

#[derive(Debug, Serialize)]
pub struct ReactionState {
    pub counts: ReactionCounts,
    pub my_reactions: Vec<ReactionKind>,
}

/// POST /api/posts/{id}/reactions
///
/// Each visitor may leave each kind of reaction once per post.
pub async fn react(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
    VisitorId(visitor): VisitorId,
    body: web::Json<ReactionRequest>,
) -> AppResult<HttpResponse> {
    let post_id = post_id.into_inner();
    let kind: ReactionKind = body.kind.parse()?;

    if !state.visitors.claim_reaction(visitor, post_id, kind).await? {
        return Err(AppError::Conflict(format!(
            "You already reacted with '{}' to this post",
            kind
        )));
    }

    let counts = match state.content.react(post_id, kind).await {
        Ok(counts) => counts,
        Err(e) => {
            if let Err(release) = state.visitors.release_reaction(visitor, post_id, kind).await {
                tracing::warn!(error = %release, %post_id, "Failed to release reaction flag");
            }
            return Err(e.into());
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ReactionState {
        counts,
        my_reactions: state.visitors.reactions_on(visitor, post_id).await,
    })))
}
