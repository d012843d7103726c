//! Recipe Repository
//!
//! Writes touching link tables run in one transaction. Prices are stored
//! as decimal text and always read back with two decimal places.

use std::str::FromStr;

use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{Ingredient, Recipe, RecipeDetail, Tag};
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::attribute;
use super::{RepoError, RepoResult};

/// Filters for the recipe list; empty vectors mean "no restriction"
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tag_ids: Vec<i64>,
    pub ingredient_ids: Vec<i64>,
}

/// Validated input for a new recipe. Tag and ingredient names are resolved
/// with get-or-create.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub link: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
}

/// Validated changes; `None` keeps the stored value / links
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
}

#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    title: String,
    time_minutes: i32,
    price: String,
    description: String,
    link: String,
}

const COLUMNS: &str = "r.id, r.title, r.time_minutes, r.price, r.description, r.link";

fn price_to_text(price: Decimal) -> String {
    let mut price = price.round_dp(2);
    price.rescale(2);
    price.to_string()
}

fn price_from_text(text: &str) -> RepoResult<Decimal> {
    let mut price = Decimal::from_str(text)
        .map_err(|e| RepoError::Database(format!("Corrupt price '{text}': {e}")))?;
    price.rescale(2);
    Ok(price)
}

fn recipe_not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::RecipeNotFound, format!("Recipe {id} not found"))
}

async fn load_detail(conn: &mut SqliteConnection, row: RecipeRow) -> RepoResult<RecipeDetail> {
    let tags: Vec<Tag> = attribute::find_for_recipe(&mut *conn, row.id).await?;
    let ingredients: Vec<Ingredient> = attribute::find_for_recipe(&mut *conn, row.id).await?;
    Ok(RecipeDetail {
        id: row.id,
        title: row.title,
        time_minutes: row.time_minutes,
        price: price_from_text(&row.price)?,
        link: row.link,
        tags,
        ingredients,
        description: row.description,
    })
}

async fn find_row<'c, E>(executor: E, user_id: i64, id: i64) -> RepoResult<Option<RecipeRow>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, RecipeRow>(&format!(
        "SELECT {COLUMNS} FROM recipes r WHERE r.id = ? AND r.user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

/// A user's recipes, newest first
///
/// Tag and ingredient filters match recipes linked to any of the given ids.
pub async fn find_all(
    pool: &SqlitePool,
    user_id: i64,
    filter: &RecipeFilter,
) -> RepoResult<Vec<Recipe>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {COLUMNS} FROM recipes r WHERE r.user_id = "
    ));
    qb.push_bind(user_id);

    if !filter.tag_ids.is_empty() {
        qb.push(" AND EXISTS (SELECT 1 FROM recipe_tags rt WHERE rt.recipe_id = r.id AND rt.tag_id IN (");
        let mut ids = qb.separated(", ");
        for id in &filter.tag_ids {
            ids.push_bind(*id);
        }
        qb.push("))");
    }
    if !filter.ingredient_ids.is_empty() {
        qb.push(" AND EXISTS (SELECT 1 FROM recipe_ingredients ri WHERE ri.recipe_id = r.id AND ri.ingredient_id IN (");
        let mut ids = qb.separated(", ");
        for id in &filter.ingredient_ids {
            ids.push_bind(*id);
        }
        qb.push("))");
    }
    qb.push(" ORDER BY r.id DESC");

    let rows: Vec<RecipeRow> = qb.build_query_as().fetch_all(pool).await?;

    let mut conn = pool.acquire().await?;
    let mut recipes = Vec::with_capacity(rows.len());
    for row in rows {
        recipes.push(load_detail(&mut conn, row).await?.into_summary());
    }
    Ok(recipes)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> RepoResult<Option<RecipeDetail>> {
    let mut conn = pool.acquire().await?;
    match find_row(&mut *conn, user_id, id).await? {
        Some(row) => Ok(Some(load_detail(&mut conn, row).await?)),
        None => Ok(None),
    }
}

/// Insert a recipe owned by `user_id` together with its links
pub async fn create(pool: &SqlitePool, user_id: i64, data: NewRecipe) -> RepoResult<RecipeDetail> {
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO recipes (user_id, title, time_minutes, price, description, link) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(&data.title)
    .bind(data.time_minutes)
    .bind(price_to_text(data.price))
    .bind(&data.description)
    .bind(&data.link)
    .fetch_one(&mut *tx)
    .await?;

    attribute::replace_for_recipe::<Tag>(&mut tx, user_id, id, &data.tags).await?;
    attribute::replace_for_recipe::<Ingredient>(&mut tx, user_id, id, &data.ingredients).await?;

    let row = find_row(&mut *tx, user_id, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create recipe".into()))?;
    let detail = load_detail(&mut tx, row).await?;

    tx.commit().await?;
    Ok(detail)
}

/// Apply changes to one of the user's recipes
///
/// Supplied link lists replace the existing links; an empty list clears.
pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    changes: RecipeChanges,
) -> RepoResult<RecipeDetail> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE recipes SET title = COALESCE(?1, title), time_minutes = COALESCE(?2, time_minutes), \
         price = COALESCE(?3, price), description = COALESCE(?4, description), \
         link = COALESCE(?5, link) WHERE id = ?6 AND user_id = ?7",
    )
    .bind(changes.title)
    .bind(changes.time_minutes)
    .bind(changes.price.map(price_to_text))
    .bind(changes.description)
    .bind(changes.link)
    .bind(id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(recipe_not_found(id));
    }

    if let Some(tags) = &changes.tags {
        attribute::replace_for_recipe::<Tag>(&mut tx, user_id, id, tags).await?;
    }
    if let Some(ingredients) = &changes.ingredients {
        attribute::replace_for_recipe::<Ingredient>(&mut tx, user_id, id, ingredients).await?;
    }

    let row = find_row(&mut *tx, user_id, id)
        .await?
        .ok_or_else(|| recipe_not_found(id))?;
    let detail = load_detail(&mut tx, row).await?;

    tx.commit().await?;
    Ok(detail)
}

/// Delete a recipe; tags and ingredients survive, only links go
pub async fn delete(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id IN (SELECT id FROM recipes WHERE id = ? AND user_id = ?)")
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id IN (SELECT id FROM recipes WHERE id = ? AND user_id = ?)")
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM recipes WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(recipe_not_found(id));
    }

    tx.commit().await?;
    Ok(())
}
