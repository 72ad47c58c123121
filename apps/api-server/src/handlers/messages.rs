//! Contact form.

use actix_web::{HttpResponse, web};

use pressroom_core::domain::NewMessage;
use pressroom_shared::ApiResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/messages
pub async fn submit_message(
    state: web::Data<AppState>,
    body: web::Json<NewMessage>,
) -> AppResult<HttpResponse> {
    let message = state.content.submit_message(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        message.id,
        "Thanks for your message. We will get back to you soon.",
    )))
}
