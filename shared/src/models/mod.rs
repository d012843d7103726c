//! Data models
//!
//! Shared between recipe-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;

// Re-exports
pub use ingredient::*;
pub use recipe::*;
pub use tag::*;
pub use user::*;
