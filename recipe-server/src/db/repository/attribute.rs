//! Tag and Ingredient Repository
//!
//! Tags and ingredients are the same shape (`id`, `name`, owner) and link
//! to recipes the same way, so one set of functions serves both through
//! [`RecipeAttribute`].

use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::ErrorCode;
use shared::models::{Ingredient, IngredientCreate, IngredientUpdate, Tag, TagCreate, TagUpdate};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Sqlite, SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult};

/// An entity attached to recipes through a link table
pub trait RecipeAttribute:
    for<'r> sqlx::FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    /// Entity table
    const TABLE: &'static str;
    /// Link table to `recipes`
    const LINK_TABLE: &'static str;
    /// Column in the link table referencing [`Self::TABLE`]
    const LINK_COLUMN: &'static str;
    /// Human-readable name used in messages
    const LABEL: &'static str;
    const NOT_FOUND: ErrorCode;

    /// Create / full-update body
    type Create: DeserializeOwned + Send + 'static;
    /// Partial-update body
    type Update: DeserializeOwned + Send + 'static;

    fn create_name(payload: Self::Create) -> String;
    fn update_name(payload: Self::Update) -> Option<String>;
}

impl RecipeAttribute for Tag {
    const TABLE: &'static str = "tags";
    const LINK_TABLE: &'static str = "recipe_tags";
    const LINK_COLUMN: &'static str = "tag_id";
    const LABEL: &'static str = "Tag";
    const NOT_FOUND: ErrorCode = ErrorCode::TagNotFound;

    type Create = TagCreate;
    type Update = TagUpdate;

    fn create_name(payload: TagCreate) -> String {
        payload.name
    }

    fn update_name(payload: TagUpdate) -> Option<String> {
        payload.name
    }
}

impl RecipeAttribute for Ingredient {
    const TABLE: &'static str = "ingredients";
    const LINK_TABLE: &'static str = "recipe_ingredients";
    const LINK_COLUMN: &'static str = "ingredient_id";
    const LABEL: &'static str = "Ingredient";
    const NOT_FOUND: ErrorCode = ErrorCode::IngredientNotFound;

    type Create = IngredientCreate;
    type Update = IngredientUpdate;

    fn create_name(payload: IngredientCreate) -> String {
        payload.name
    }

    fn update_name(payload: IngredientUpdate) -> Option<String> {
        payload.name
    }
}

fn not_found<A: RecipeAttribute>(id: i64) -> RepoError {
    RepoError::Business(A::NOT_FOUND, format!("{} {id} not found", A::LABEL))
}

/// All of a user's records, `name` descending
///
/// `assigned_only` keeps only records linked to at least one recipe. The
/// `EXISTS` filter cannot produce duplicates.
pub async fn find_all<A: RecipeAttribute>(
    pool: &SqlitePool,
    user_id: i64,
    assigned_only: bool,
) -> RepoResult<Vec<A>> {
    let assigned = if assigned_only {
        format!(
            " AND EXISTS (SELECT 1 FROM {link} l WHERE l.{col} = t.id)",
            link = A::LINK_TABLE,
            col = A::LINK_COLUMN
        )
    } else {
        String::new()
    };
    let sql = format!(
        "SELECT t.id, t.name FROM {table} t WHERE t.user_id = ?{assigned} \
         ORDER BY t.name DESC, t.id DESC",
        table = A::TABLE
    );

    let rows = sqlx::query_as::<_, A>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id<A: RecipeAttribute>(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
) -> RepoResult<Option<A>> {
    let sql = format!(
        "SELECT id, name FROM {} WHERE id = ? AND user_id = ?",
        A::TABLE
    );
    let row = sqlx::query_as::<_, A>(&sql)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create<A: RecipeAttribute>(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
) -> RepoResult<A> {
    let sql = format!(
        "INSERT INTO {} (user_id, name) VALUES (?, ?) RETURNING id, name",
        A::TABLE
    );
    let row = sqlx::query_as::<_, A>(&sql)
        .bind(user_id)
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

/// Rename; `None` leaves the record as is
pub async fn update<A: RecipeAttribute>(
    pool: &SqlitePool,
    user_id: i64,
    id: i64,
    name: Option<&str>,
) -> RepoResult<A> {
    let sql = format!(
        "UPDATE {} SET name = COALESCE(?, name) WHERE id = ? AND user_id = ? RETURNING id, name",
        A::TABLE
    );
    sqlx::query_as::<_, A>(&sql)
        .bind(name)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<A>(id))
}

/// Delete a record; its recipe links go with it (ON DELETE CASCADE)
pub async fn delete<A: RecipeAttribute>(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ? AND user_id = ?", A::TABLE);
    let rows = sqlx::query(&sql)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found::<A>(id));
    }
    Ok(())
}

/// Records linked to a recipe, `id` ascending
pub async fn find_for_recipe<'c, A, E>(executor: E, recipe_id: i64) -> RepoResult<Vec<A>>
where
    A: RecipeAttribute,
    E: Executor<'c, Database = Sqlite>,
{
    let sql = format!(
        "SELECT t.id, t.name FROM {table} t JOIN {link} l ON l.{col} = t.id \
         WHERE l.recipe_id = ? ORDER BY t.id",
        table = A::TABLE,
        link = A::LINK_TABLE,
        col = A::LINK_COLUMN
    );
    let rows = sqlx::query_as::<_, A>(&sql)
        .bind(recipe_id)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

/// Reuse the user's oldest record with this exact name, or create one
pub async fn get_or_create<A: RecipeAttribute>(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
) -> RepoResult<(i64, bool)> {
    let select = format!(
        "SELECT id FROM {} WHERE user_id = ? AND name = ? ORDER BY id LIMIT 1",
        A::TABLE
    );
    let existing: Option<i64> = sqlx::query_scalar(&select)
        .bind(user_id)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    if let Some(id) = existing {
        return Ok((id, false));
    }

    let insert = format!(
        "INSERT INTO {} (user_id, name) VALUES (?, ?) RETURNING id",
        A::TABLE
    );
    let id: i64 = sqlx::query_scalar(&insert)
        .bind(user_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok((id, true))
}

/// Replace a recipe's links with the resolved `names`
///
/// Each name goes through [`get_or_create`]; repeated names collapse into
/// one link. An empty slice clears the links.
pub async fn replace_for_recipe<A: RecipeAttribute>(
    conn: &mut SqliteConnection,
    user_id: i64,
    recipe_id: i64,
    names: &[String],
) -> RepoResult<()> {
    let clear = format!("DELETE FROM {} WHERE recipe_id = ?", A::LINK_TABLE);
    sqlx::query(&clear)
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    let link = format!(
        "INSERT OR IGNORE INTO {} (recipe_id, {}) VALUES (?, ?)",
        A::LINK_TABLE,
        A::LINK_COLUMN
    );
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let (id, created) = get_or_create::<A>(conn, user_id, name).await?;
        if created {
            tracing::debug!(user_id, id, name = %name, "{} created inline", A::LABEL);
        }
        sqlx::query(&link)
            .bind(recipe_id)
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    async fn recipe(pool: &SqlitePool, user_id: i64, title: &str) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO recipes (user_id, title, time_minutes, price) VALUES (?, ?, 5, '1.00') RETURNING id",
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn link(pool: &SqlitePool, user_id: i64, recipe_id: i64, names: &[&str]) {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let mut conn = pool.acquire().await.unwrap();
        replace_for_recipe::<Tag>(&mut conn, user_id, recipe_id, &names)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_list_ordered_by_name_desc() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "user@example.com").await;

        create::<Tag>(&pool, user, "Dessert").await.unwrap();
        create::<Tag>(&pool, user, "Vegan").await.unwrap();
        create::<Tag>(&pool, user, "Breakfast").await.unwrap();

        let tags: Vec<Tag> = find_all(&pool, user, false).await.unwrap();
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Vegan", "Dessert", "Breakfast"]);
    }

    #[tokio::test]
    async fn test_records_scoped_to_owner() {
        let pool = test_support::pool().await;
        let owner = test_support::user(&pool, "owner@example.com").await;
        let other = test_support::user(&pool, "other@example.com").await;

        let salt: Ingredient = create(&pool, other, "Salt").await.unwrap();
        create::<Ingredient>(&pool, owner, "Pepper").await.unwrap();

        let mine: Vec<Ingredient> = find_all(&pool, owner, false).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Pepper");

        assert!(find_by_id::<Ingredient>(&pool, owner, salt.id).await.unwrap().is_none());
        let err = update::<Ingredient>(&pool, owner, salt.id, Some("Sugar")).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::IngredientNotFound, _)));
        assert!(delete::<Ingredient>(&pool, owner, salt.id).await.is_err());

        let still = find_by_id::<Ingredient>(&pool, other, salt.id).await.unwrap().unwrap();
        assert_eq!(still.name, "Salt");
    }

    #[tokio::test]
    async fn test_update_without_name_is_noop() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "user@example.com").await;
        let tag: Tag = create(&pool, user, "Lunch").await.unwrap();

        let same: Tag = update(&pool, user, tag.id, None).await.unwrap();
        assert_eq!(same, tag);
        let renamed: Tag = update(&pool, user, tag.id, Some("Dinner")).await.unwrap();
        assert_eq!(renamed.name, "Dinner");
    }

    #[tokio::test]
    async fn test_assigned_only_is_distinct() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "user@example.com").await;

        let r1 = recipe(&pool, user, "Pancakes").await;
        let r2 = recipe(&pool, user, "Porridge").await;
        link(&pool, user, r1, &["Breakfast"]).await;
        link(&pool, user, r2, &["Breakfast"]).await;
        create::<Tag>(&pool, user, "Dinner").await.unwrap();

        let all: Vec<Tag> = find_all(&pool, user, false).await.unwrap();
        assert_eq!(all.len(), 2);

        let assigned: Vec<Tag> = find_all(&pool, user, true).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].name, "Breakfast");
    }

    #[tokio::test]
    async fn test_replace_reuses_and_dedupes() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "user@example.com").await;
        let existing: Tag = create(&pool, user, "Indian").await.unwrap();
        let r = recipe(&pool, user, "Curry").await;

        link(&pool, user, r, &["Indian", "Spicy", "Spicy"]).await;

        let linked: Vec<Tag> = find_for_recipe(&pool, r).await.unwrap();
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].id, existing.id);
        assert_eq!(linked[1].name, "Spicy");

        let all: Vec<Tag> = find_all(&pool, user, false).await.unwrap();
        assert_eq!(all.len(), 2);

        link(&pool, user, r, &[]).await;
        let linked: Vec<Tag> = find_for_recipe(&pool, r).await.unwrap();
        assert!(linked.is_empty());
        assert_eq!(find_all::<Tag>(&pool, user, false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_or_create_is_per_user() {
        let pool = test_support::pool().await;
        let a = test_support::user(&pool, "a@example.com").await;
        let b = test_support::user(&pool, "b@example.com").await;
        let mut conn = pool.acquire().await.unwrap();

        let (id_a, created_a) = get_or_create::<Tag>(&mut conn, a, "Vegan").await.unwrap();
        let (id_a2, created_a2) = get_or_create::<Tag>(&mut conn, a, "Vegan").await.unwrap();
        let (id_b, created_b) = get_or_create::<Tag>(&mut conn, b, "Vegan").await.unwrap();

        assert!(created_a);
        assert!(!created_a2);
        assert_eq!(id_a, id_a2);
        assert!(created_b);
        assert_ne!(id_a, id_b);
    }

    #[tokio::test]
    async fn test_delete_removes_links_only() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "user@example.com").await;
        let r = recipe(&pool, user, "Salad").await;
        link(&pool, user, r, &["Green"]).await;

        let tag = find_all::<Tag>(&pool, user, false).await.unwrap().remove(0);
        delete::<Tag>(&pool, user, tag.id).await.unwrap();

        assert!(find_for_recipe::<Tag, _>(&pool, r).await.unwrap().is_empty());
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE id = ?")
            .bind(r)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
