//! Authentication middleware
//!
//! Validates the JWT bearer token on every `/api/` request except the
//! public account endpoints.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;

/// Routes reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &["/api/user/create/", "/api/user/token/"];

/// Whether a path skips authentication
///
/// - non-`/api/` paths (health, unknown paths that should 404)
/// - account creation and token issue
pub fn is_public_route(path: &str) -> bool {
    !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path)
}

/// Authentication middleware
///
/// Extracts and validates `Authorization: Bearer <token>`, then checks the
/// user still exists and is active. On success the [`CurrentUser`] is
/// inserted into request extensions, and into the response extensions for
/// the logging middleware that wraps this one.
///
/// | Failure | Status |
/// |---------|--------|
/// | no Authorization header | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | invalid token / unknown user | 401 TokenInvalid |
/// | inactive user | 401 AccountDisabled |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), req.uri().path()).await?;
    req.extensions_mut().insert(user.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

/// Resolve the caller from request headers
pub async fn authenticate(
    state: &ServerState,
    headers: &HeaderMap,
    path: &str,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", path = path.to_string());
            return Err(AppError::not_authenticated());
        }
    };

    let claims = match state.get_jwt_service().validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                path = path.to_string()
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let user_id = claims
        .user_id()
        .map_err(|e| AppError::invalid_token(e.to_string()))?;

    let Some(row) = user::find_by_id(&state.pool, user_id).await? else {
        security_log!("WARN", "auth_unknown_user", user_id = user_id);
        return Err(AppError::invalid_token("User not found"));
    };

    if !row.is_active {
        security_log!("WARN", "auth_inactive_user", user_id = user_id);
        return Err(AppError::new(crate::ErrorCode::AccountDisabled));
    }

    Ok(CurrentUser {
        id: row.id,
        email: row.email,
        name: row.name,
    })
}
