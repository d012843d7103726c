//! CurrentUser extractor
//!
//! Handlers take `user: CurrentUser` directly. The middleware normally has
//! already resolved it; otherwise the token is validated here.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{CurrentUser, authenticate};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(state, &parts.headers, parts.uri.path()).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
