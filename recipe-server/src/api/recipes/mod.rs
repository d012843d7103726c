//! Recipe API
//!
//! | Path | Methods |
//! |------|---------|
//! | /api/recipe/recipes/ | GET (`?tags=1,2&ingredients=3`), POST |
//! | /api/recipe/recipes/{id}/ | GET, PUT, PATCH, DELETE |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::RecipeQuery;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/recipe/recipes/",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/recipe/recipes/{id}/",
            get(handler::retrieve)
                .put(handler::update)
                .patch(handler::partial_update)
                .delete(handler::delete),
        )
}
