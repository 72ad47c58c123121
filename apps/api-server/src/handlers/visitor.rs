//! Visitor preferences: bookmarks, language and popup dismissals.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use pressroom_shared::ApiResponse;
use pressroom_shared::dto::{BookmarksResponse, LanguageRequest, LanguageResponse, PopupStatus};

use crate::middleware::error::AppResult;
use crate::middleware::visitor::VisitorId;
use crate::state::AppState;

/// GET /api/visitor/bookmarks
pub async fn bookmarks(
    state: web::Data<AppState>,
    VisitorId(visitor): VisitorId,
) -> AppResult<HttpResponse> {
    let post_ids = state.visitors.bookmarks(visitor).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BookmarksResponse { post_ids })))
}

/// PUT /api/visitor/bookmarks/{post_id}
pub async fn add_bookmark(
    state: web::Data<AppState>,
    VisitorId(visitor): VisitorId,
    post_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.content.post(post_id.into_inner()).await?;
    let post_ids = state.visitors.add_bookmark(visitor, post.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BookmarksResponse { post_ids })))
}

/// DELETE /api/visitor/bookmarks/{post_id}
pub async fn remove_bookmark(
    state: web::Data<AppState>,
    VisitorId(visitor): VisitorId,
    post_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_ids = state
        .visitors
        .remove_bookmark(visitor, post_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(BookmarksResponse { post_ids })))
}

/// GET /api/visitor/language
pub async fn language(
    state: web::Data<AppState>,
    VisitorId(visitor): VisitorId,
) -> AppResult<HttpResponse> {
    let language = state.visitors.language(visitor).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(LanguageResponse { language })))
}

/// PUT /api/visitor/language
pub async fn set_language(
    state: web::Data<AppState>,
    VisitorId(visitor): VisitorId,
    body: web::Json<LanguageRequest>,
) -> AppResult<HttpResponse> {
    let language = state
        .visitors
        .set_language(visitor, &body.language)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(LanguageResponse { language })))
}

/// GET /api/visitor/popups/{name}
pub async fn popup_status(
    state: web::Data<AppState>,
    VisitorId(visitor): VisitorId,
    name: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = name.into_inner();
    let dismissed_at = state.visitors.popup_dismissed_at(visitor, &name).await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PopupStatus {
        name,
        dismissed: dismissed_at.is_some(),
        dismissed_at,
    })))
}

/// POST /api/visitor/popups/{name}/dismiss
pub async fn dismiss_popup(
    state: web::Data<AppState>,
    VisitorId(visitor): VisitorId,
    name: web::Path<String>,
) -> AppResult<HttpResponse> {
    let name = name.into_inner();
    let at = state.visitors.dismiss_popup(visitor, &name).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PopupStatus {
        name,
        dismissed: true,
        dismissed_at: Some(at),
    })))
}
