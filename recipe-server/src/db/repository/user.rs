//! User Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::UserProfile;
use shared::util::now_millis;
use sqlx::SqlitePool;

/// User row, including the password hash. Never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: i64,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

const COLUMNS: &str = "id, email, name, password_hash, is_active, is_staff, created_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Lookup by an already-normalized email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user =
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(user)
}

/// Create a regular user. `email` must be normalized by the caller.
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> RepoResult<User> {
    let result = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (email, name, password_hash, is_active, is_staff, created_at) \
         VALUES (?, ?, ?, 1, 0, ?) RETURNING {COLUMNS}"
    ))
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(now_millis())
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(e) => match RepoError::from(e) {
            RepoError::Duplicate(_) => Err(RepoError::Business(
                ErrorCode::EmailAlreadyExists,
                format!("A user with email {email} already exists"),
            )),
            other => Err(other),
        },
    }
}

/// Update profile fields; `None` keeps the stored value
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    email: Option<&str>,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> RepoResult<User> {
    let result = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET email = COALESCE(?1, email), name = COALESCE(?2, name), \
         password_hash = COALESCE(?3, password_hash) WHERE id = ?4 RETURNING {COLUMNS}"
    ))
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(id)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(RepoError::Business(
            ErrorCode::UserNotFound,
            format!("User {id} not found"),
        )),
        Err(e) => match RepoError::from(e) {
            RepoError::Duplicate(_) => Err(RepoError::Business(
                ErrorCode::EmailAlreadyExists,
                "A user with this email already exists".into(),
            )),
            other => Err(other),
        },
    }
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE users SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}
