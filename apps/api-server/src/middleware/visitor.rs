//! Anonymous visitor identification.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use uuid::Uuid;

use crate::middleware::error::AppError;

pub const VISITOR_HEADER: &str = "X-Visitor-Id";

/// The visitor id a browser sends in `X-Visitor-Id`.
///
/// Clients generate the UUID once and keep it in local storage. Use
/// `Option<VisitorId>` where the header is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorId(pub Uuid);

impl FromRequest for VisitorId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(VISITOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map(VisitorId)
            .ok_or_else(|| {
                AppError::BadRequest(format!("{} header with a UUID is required", VISITOR_HEADER))
            });
        ready(id)
    }
}
