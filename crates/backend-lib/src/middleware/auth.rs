// ============================
// crates/backend-lib/src/middleware/auth.rs
// ============================
//! Bearer token middleware for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use metrics::counter;
use std::sync::Arc;

use crate::auth::Claims;
use crate::error::AppError;
use crate::metrics as keys;
use crate::store::Store;
use crate::AppState;

/// Require a valid bearer token; on success the verified claims are
/// attached to the request for downstream handlers.
///
/// Missing header, wrong scheme, bad signature, and expiry all produce the
/// same 401.
pub async fn require_auth<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let claims = state.tokens.verify(token).inspect_err(|_| {
        counter!(keys::TOKEN_REJECTED).increment(1);
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract claims from request extensions.
///
/// Use in handlers behind `require_auth`:
/// ```ignore
/// async fn handler(claims: Claims) -> impl IntoResponse {
///     format!("hello {}", claims.username)
/// }
/// ```
impl<S> axum::extract::FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}
