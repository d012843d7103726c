//! User API
//!
//! | Path | Methods | Auth |
//! |------|---------|------|
//! | /api/user/create/ | POST | public |
//! | /api/user/token/ | POST | public |
//! | /api/user/me/ | GET, PUT, PATCH | required |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/user/create/", post(handler::create))
        .route("/api/user/token/", post(handler::token))
        .route(
            "/api/user/me/",
            get(handler::me)
                .put(handler::update_me)
                .patch(handler::partial_update_me),
        )
}
