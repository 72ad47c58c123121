//! Reader polls.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use pressroom_shared::ApiResponse;
use pressroom_shared::dto::VoteRequest;

use crate::handlers::views::PollView;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::visitor::VisitorId;
use crate::state::AppState;

/// GET /api/polls - polls still open for voting.
pub async fn active_polls(
    state: web::Data<AppState>,
    visitor: Option<VisitorId>,
) -> AppResult<HttpResponse> {
    let polls = state.content.active_polls(Utc::now()).await?;

    let mut views = Vec::with_capacity(polls.len());
    for poll in polls {
        let has_voted = match visitor {
            Some(VisitorId(visitor)) => state.visitors.has_voted(visitor, poll.id).await,
            None => false,
        };
        views.push(PollView::new(poll, has_voted));
    }
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views)))
}

/// POST /api/polls/{id}/vote
///
/// One vote per visitor per poll.
pub async fn vote(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    VisitorId(visitor): VisitorId,
    body: web::Json<VoteRequest>,
) -> AppResult<HttpResponse> {
    let poll_id = id.into_inner();

    if !state.visitors.claim_vote(visitor, poll_id).await? {
        return Err(AppError::Conflict(
            "You have already voted in this poll".to_string(),
        ));
    }

    let poll = match state.content.vote_poll(poll_id, body.option_index).await {
        Ok(poll) => poll,
        Err(e) => {
            if let Err(release) = state.visitors.release_vote(visitor, poll_id).await {
                tracing::warn!(error = %release, %poll_id, "Failed to release vote flag");
            }
            return Err(e.into());
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PollView::new(poll, true))))
}
