// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ID token authentication middleware.

use crate::services::id_token::IdTokenError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie carrying the ID token for browser sessions.
pub const SESSION_COOKIE: &str = "__session";

/// Authenticated user extracted from a verified ID token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
}

/// Middleware that requires a valid ID token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_token(&jar, request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;
    let auth_user = verify(&state, &token).await?;

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Middleware for routes that also serve anonymous callers.
///
/// Inserts `Option<AuthUser>`: `None` without a token. A token that is
/// present but invalid is still rejected.
pub async fn optional_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_user = match extract_token(&jar, request.headers()) {
        Some(token) => Some(verify(&state, &token).await?),
        None => None,
    };

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Session cookie first, then `Authorization: Bearer`.
fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

async fn verify(state: &AppState, token: &str) -> Result<AuthUser, StatusCode> {
    let user = state
        .id_token_verifier
        .verify(token)
        .await
        .map_err(|err| match err {
            IdTokenError::Rejected(reason) => {
                tracing::debug!(reason = %reason, "Rejected ID token");
                StatusCode::UNAUTHORIZED
            }
            IdTokenError::Transient(reason) => {
                tracing::error!(reason = %reason, "ID token verification transient failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    Ok(AuthUser { uid: user.uid })
}
