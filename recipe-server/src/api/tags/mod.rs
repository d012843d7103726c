//! Tag API
//!
//! `/api/recipe/tags/` - see [`crate::api::attributes`]

use axum::Router;
use shared::models::Tag;

use crate::api::attributes;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    attributes::router::<Tag>("/api/recipe/tags")
}
