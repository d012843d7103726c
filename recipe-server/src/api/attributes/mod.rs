//! Generic CRUD routes for recipe attributes (tags, ingredients)
//!
//! | Path | Methods |
//! |------|---------|
//! | `{base}/` | GET (`?assigned_only=1`), POST |
//! | `{base}/{id}/` | GET, PUT, PATCH, DELETE |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::db::repository::RecipeAttribute;

pub use handler::AttributeQuery;

pub fn router<A: RecipeAttribute>(base: &str) -> Router<ServerState> {
    Router::new()
        .route(
            &format!("{base}/"),
            get(handler::list::<A>).post(handler::create::<A>),
        )
        .route(
            &format!("{base}/{{id}}/"),
            get(handler::retrieve::<A>)
                .put(handler::update::<A>)
                .patch(handler::partial_update::<A>)
                .delete(handler::delete::<A>),
        )
}
