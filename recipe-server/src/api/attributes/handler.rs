//! Tag / Ingredient API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RecipeAttribute, attribute};
use crate::utils::validation::{MAX_NAME_LEN, parse_int_param, validate_required_text};
use crate::utils::{AppError, AppJson, AppPath, AppQuery, AppResult};

/// List query: `assigned_only=<int>`, non-zero keeps only records used by a recipe
#[derive(Debug, Default, Deserialize)]
pub struct AttributeQuery {
    pub assigned_only: Option<String>,
}

fn not_found<A: RecipeAttribute>(id: i64) -> AppError {
    AppError::with_message(A::NOT_FOUND, format!("{} {id} not found", A::LABEL))
}

fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    Ok(name.to_string())
}

/// GET {base}/
pub async fn list<A: RecipeAttribute>(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppQuery(query): AppQuery<AttributeQuery>,
) -> AppResult<Json<Vec<A>>> {
    let assigned_only = parse_int_param(query.assigned_only.as_deref(), "assigned_only")?
        .is_some_and(|v| v != 0);
    let records = attribute::find_all::<A>(&state.pool, user.id, assigned_only).await?;
    Ok(Json(records))
}

/// GET {base}/{id}/
pub async fn retrieve<A: RecipeAttribute>(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<A>> {
    let record = attribute::find_by_id::<A>(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| not_found::<A>(id))?;
    Ok(Json(record))
}

/// POST {base}/
pub async fn create<A: RecipeAttribute>(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<A::Create>,
) -> AppResult<(StatusCode, Json<A>)> {
    let name = clean_name(&A::create_name(payload))?;
    let record = attribute::create::<A>(&state.pool, user.id, &name).await?;
    tracing::info!(user_id = user.id, name = %name, "{} created", A::LABEL);
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT {base}/{id}/ - `name` required
pub async fn update<A: RecipeAttribute>(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<A::Create>,
) -> AppResult<Json<A>> {
    let name = clean_name(&A::create_name(payload))?;
    let record = attribute::update::<A>(&state.pool, user.id, id, Some(&name)).await?;
    Ok(Json(record))
}

/// PATCH {base}/{id}/
pub async fn partial_update<A: RecipeAttribute>(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<A::Update>,
) -> AppResult<Json<A>> {
    let name = A::update_name(payload).map(|n| clean_name(&n)).transpose()?;
    let record = attribute::update::<A>(&state.pool, user.id, id, name.as_deref()).await?;
    Ok(Json(record))
}

/// DELETE {base}/{id}/
pub async fn delete<A: RecipeAttribute>(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    attribute::delete::<A>(&state.pool, user.id, id).await?;
    tracing::info!(user_id = user.id, id, "{} deleted", A::LABEL);
    Ok(StatusCode::NO_CONTENT)
}
