use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use campus_core::AppError;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the bearer token to a hydrated principal for protected routes.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?
        .to_owned();

    let identity = state
        .identity_provider
        .verify_token(token.as_str())
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid or expired token".to_owned()))?;

    let principal = state
        .authorization_service
        .resolve_principal(&identity)
        .await?;
    debug!(subject = %principal.subject, roles = ?principal.user_roles(), "resolved principal");

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
