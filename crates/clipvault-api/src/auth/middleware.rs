use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::session::SessionVerifier;
use crate::constants::SESSION_COOKIE;

/// Resolve the caller's session and attach `AuthenticatedUser` to the request.
///
/// Requests without a valid session pass through untouched; routes that need
/// an identity reject on their own.
pub async fn session_middleware(
    State(sessions): State<Arc<SessionVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_session_token(request.headers()) {
        match sessions.verify(&token) {
            Ok(user) => {
                tracing::debug!(user_id = %user.user_id, "Session verified");
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
            }
        }
    }

    next.run(request).await
}

/// Bearer token from the Authorization header, falling back to the session cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
