//! Repository Module
//!
//! Free async functions over `&SqlitePool`. Every recipe, tag and
//! ingredient query is scoped by the owning `user_id`; rows of other users
//! are indistinguishable from missing rows.

pub mod attribute;
pub mod recipe;
pub mod user;

pub use attribute::RecipeAttribute;

use shared::error::ErrorCode;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{1}")]
    Business(ErrorCode, String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    use crate::db::DbService;

    /// Fresh migrated in-memory database
    pub async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    /// Insert a user row directly (password hashing is not under test here)
    pub async fn user(pool: &SqlitePool, email: &str) -> i64 {
        super::user::create(pool, email, "Test User", "not-a-real-hash")
            .await
            .unwrap()
            .id
    }
}
