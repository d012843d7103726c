//! Ingredient API
//!
//! `/api/recipe/ingredients/` - see [`crate::api::attributes`]

use axum::Router;
use shared::models::Ingredient;

use crate::api::attributes;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    attributes::router::<Ingredient>("/api/recipe/ingredients")
}
