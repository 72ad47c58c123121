//! Admin authentication extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use pressroom_core::ports::{ADMIN_ROLE, AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// An authenticated admin session.
///
/// Add it to a handler's arguments to require a Bearer token carrying the
/// admin role:
/// ```ignore
/// async fn stats(_admin: AdminIdentity, state: web::Data<AppState>) -> AppResult<HttpResponse>
/// ```
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub subject: String,
    pub expires_at: i64,
}

impl TryFrom<TokenClaims> for AdminIdentity {
    type Error = AuthError;

    fn try_from(claims: TokenClaims) -> Result<Self, Self::Error> {
        if !claims.has_role(ADMIN_ROLE) {
            return Err(AuthError::InsufficientPermissions);
        }
        Ok(Self {
            subject: claims.subject,
            expires_at: claims.exp,
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

fn authenticate(req: &HttpRequest) -> Result<AdminIdentity, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AppError::Internal("Server configuration error".to_string()));
    };

    let token = bearer_token(req)?;
    let claims = state.tokens.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected admin token");
        e
    })?;
    Ok(AdminIdentity::try_from(claims)?)
}

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
