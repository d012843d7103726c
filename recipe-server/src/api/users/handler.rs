//! User API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use shared::models::{TokenRequest, TokenResponse, UserCreate, UserProfile, UserUpdate};
use shared::util::normalize_email;

use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, require_field, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppJson, AppResult};

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    Ok(name.to_string())
}

fn clean_email(email: &str) -> AppResult<String> {
    let email = normalize_email(email);
    validate_email(&email)?;
    Ok(email)
}

/// POST /api/user/create/
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<UserCreate>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let email = clean_email(&payload.email)?;
    let name = clean_name(&payload.name)?;
    validate_password(&payload.password)?;

    let password_hash = hash(&payload.password)?;
    let created = user::create(&state.pool, &email, &name, &password_hash).await?;

    tracing::info!(user_id = created.id, "User registered");
    Ok((StatusCode::CREATED, Json(created.profile())))
}

/// POST /api/user/token/
///
/// Unknown email, wrong password and inactive account all answer the same 401.
pub async fn token(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let email = normalize_email(&payload.email);

    let found = user::find_by_email(&state.pool, &email).await?;
    let Some(row) = found.filter(|u| verify_password(&payload.password, &u.password_hash))
    else {
        security_log!("WARN", "login_failed", email = email.clone());
        return Err(AppError::invalid_credentials());
    };

    if !row.is_active {
        security_log!("WARN", "login_inactive", user_id = row.id);
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(row.id, &row.email)
        .map_err(|e| AppError::internal(e.to_string()))?;

    security_log!("INFO", "login_success", user_id = row.id);
    Ok(Json(TokenResponse { token }))
}

/// GET /api/user/me/
pub async fn me(user: CurrentUser) -> Json<UserProfile> {
    Json(UserProfile {
        email: user.email,
        name: user.name,
    })
}

/// PUT /api/user/me/ - `email` and `name` required
pub async fn update_me(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<UserUpdate>,
) -> AppResult<Json<UserProfile>> {
    require_field(payload.email.as_ref(), "email")?;
    require_field(payload.name.as_ref(), "name")?;
    apply_update(&state, &user, payload).await
}

/// PATCH /api/user/me/
pub async fn partial_update_me(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<UserUpdate>,
) -> AppResult<Json<UserProfile>> {
    apply_update(&state, &user, payload).await
}

async fn apply_update(
    state: &ServerState,
    current: &CurrentUser,
    payload: UserUpdate,
) -> AppResult<Json<UserProfile>> {
    let email = payload.email.as_deref().map(clean_email).transpose()?;
    let name = payload.name.as_deref().map(clean_name).transpose()?;
    let password_hash = match payload.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(hash(password)?)
        }
        None => None,
    };

    let updated = user::update(
        &state.pool,
        current.id,
        email.as_deref(),
        name.as_deref(),
        password_hash.as_deref(),
    )
    .await?;

    if password_hash.is_some() {
        security_log!("INFO", "password_changed", user_id = current.id);
    }
    Ok(Json(updated.profile()))
}
