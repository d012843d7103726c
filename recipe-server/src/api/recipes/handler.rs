//! Recipe API Handlers

use axum::{Json, extract::State};
use http::StatusCode;
use serde::Deserialize;
use shared::models::{NameRef, Recipe, RecipeCreate, RecipeDetail, RecipeUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::recipe::{self, NewRecipe, RecipeChanges, RecipeFilter};
use crate::utils::validation::{
    MAX_NAME_LEN, parse_id_list, require_field, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppJson, AppPath, AppQuery, AppResult, ErrorCode};

/// List query: comma-separated tag / ingredient ids
#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::RecipeNotFound, format!("Recipe {id} not found"))
}

/// Trim and validate inline tag / ingredient names
fn clean_names(refs: Vec<NameRef>, field: &str) -> AppResult<Vec<String>> {
    refs.into_iter()
        .map(|r| {
            let name = r.name.trim().to_string();
            validate_required_text(&name, field, MAX_NAME_LEN)?;
            Ok(name)
        })
        .collect()
}

fn clean_title(title: String) -> AppResult<String> {
    let title = title.trim().to_string();
    validate_required_text(&title, "title", MAX_NAME_LEN)?;
    Ok(title)
}

/// Validate the optional part of an update shared by PUT and PATCH
fn changes_from(payload: RecipeUpdate) -> AppResult<RecipeChanges> {
    validate_optional_text(&payload.link, "link", MAX_NAME_LEN)?;
    if let Some(price) = payload.price {
        validate_price(price)?;
    }

    Ok(RecipeChanges {
        title: payload.title.map(clean_title).transpose()?,
        time_minutes: payload.time_minutes,
        price: payload.price,
        description: payload.description,
        link: payload.link,
        tags: payload.tags.map(|t| clean_names(t, "tags")).transpose()?,
        ingredients: payload
            .ingredients
            .map(|i| clean_names(i, "ingredients"))
            .transpose()?,
    })
}

/// GET /api/recipe/recipes/
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppQuery(query): AppQuery<RecipeQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    let filter = RecipeFilter {
        tag_ids: parse_id_list(query.tags.as_deref(), "tags")?,
        ingredient_ids: parse_id_list(query.ingredients.as_deref(), "ingredients")?,
    };
    let recipes = recipe::find_all(&state.pool, user.id, &filter).await?;
    Ok(Json(recipes))
}

/// GET /api/recipe/recipes/{id}/
pub async fn retrieve(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<RecipeDetail>> {
    let detail = recipe::find_by_id(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(detail))
}

/// POST /api/recipe/recipes/
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<RecipeCreate>,
) -> AppResult<(StatusCode, Json<RecipeDetail>)> {
    validate_optional_text(&payload.link, "link", MAX_NAME_LEN)?;
    validate_price(payload.price)?;

    let data = NewRecipe {
        title: clean_title(payload.title)?,
        time_minutes: payload.time_minutes,
        price: payload.price,
        description: payload.description.unwrap_or_default(),
        link: payload.link.unwrap_or_default(),
        tags: clean_names(payload.tags, "tags")?,
        ingredients: clean_names(payload.ingredients, "ingredients")?,
    };

    let detail = recipe::create(&state.pool, user.id, data).await?;
    tracing::info!(user_id = user.id, recipe_id = detail.id, "Recipe created");
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/recipe/recipes/{id}/
///
/// `title`, `time_minutes` and `price` are required. Omitted optional
/// fields and link lists keep their stored values.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<RecipeUpdate>,
) -> AppResult<Json<RecipeDetail>> {
    require_field(payload.title.as_ref(), "title")?;
    require_field(payload.time_minutes, "time_minutes")?;
    require_field(payload.price, "price")?;

    let changes = changes_from(payload)?;
    let detail = recipe::update(&state.pool, user.id, id, changes).await?;
    Ok(Json(detail))
}

/// PATCH /api/recipe/recipes/{id}/
pub async fn partial_update(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<RecipeUpdate>,
) -> AppResult<Json<RecipeDetail>> {
    let changes = changes_from(payload)?;
    let detail = recipe::update(&state.pool, user.id, id, changes).await?;
    Ok(Json(detail))
}

/// DELETE /api/recipe/recipes/{id}/
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    recipe::delete(&state.pool, user.id, id).await?;
    tracing::info!(user_id = user.id, recipe_id = id, "Recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_names_trims_and_rejects_blank() {
        let names = clean_names(vec![NameRef::new("  Thai "), NameRef::new("Dinner")], "tags")
            .unwrap();
        assert_eq!(names, vec!["Thai", "Dinner"]);

        assert!(clean_names(vec![NameRef::new("   ")], "tags").is_err());
    }

    #[test]
    fn test_changes_from_validates_price() {
        let payload: RecipeUpdate = serde_json::from_str(r#"{"price":"1.234"}"#).unwrap();
        let err = changes_from(payload).unwrap_err();
        assert_eq!(err.code, ErrorCode::RecipeInvalidPrice);
    }

    #[test]
    fn test_changes_from_keeps_absent_fields_absent() {
        let payload: RecipeUpdate = serde_json::from_str(r#"{"title":" New title "}"#).unwrap();
        let changes = changes_from(payload).unwrap();
        assert_eq!(changes.title.as_deref(), Some("New title"));
        assert!(changes.tags.is_none());
        assert!(changes.price.is_none());
    }
}
