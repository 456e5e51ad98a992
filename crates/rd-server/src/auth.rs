//! Staff bearer-token authentication.
//!
//! When `auth.staff` is empty the API is open and no identity is attached.
//! Otherwise every request under `/api` must carry
//! `Authorization: Bearer <token>` matching a configured staff member.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use rd_core::identity::StaffIdentity;

use crate::error::ApiError;
use crate::state::AppState;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
}

/// Resolve the caller and attach a [`StaffIdentity`] extension.
///
/// # Errors
///
/// [`ApiError::Unauthorized`] when auth is enabled and the token is missing
/// or unknown.
pub async fn require_staff(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.auth.is_enabled() {
        return Ok(next.run(req).await);
    }

    let username = bearer_token(req.headers())
        .and_then(|token| state.auth.username_for(token))
        .ok_or_else(|| {
            tracing::debug!(path = %req.uri().path(), "rejected unauthenticated request");
            ApiError::Unauthorized
        })?
        .to_string();

    req.extensions_mut().insert(StaffIdentity::new(username));
    Ok(next.run(req).await)
}
