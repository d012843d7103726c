//! Recipe Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Ingredient, Tag};

/// Recipe as returned by the list endpoint
///
/// `price` serializes as a decimal string with two places (`"5.50"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// Recipe with its description (retrieve / create / update responses)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub description: String,
}

impl RecipeDetail {
    /// Drop the description, yielding the list shape
    pub fn into_summary(self) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title,
            time_minutes: self.time_minutes,
            price: self.price,
            link: self.link,
            tags: self.tags,
            ingredients: self.ingredients,
        }
    }
}

/// Inline tag/ingredient reference inside a recipe payload
///
/// Resolved by name against the caller's own records (get-or-create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRef {
    pub name: String,
}

impl NameRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Create recipe payload
///
/// Any `user` key in the body is ignored; the owner is always the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<NameRef>,
    #[serde(default)]
    pub ingredients: Vec<NameRef>,
}

/// Update recipe payload (PUT and PATCH)
///
/// `tags` / `ingredients`: `None` leaves the associations untouched,
/// `Some(vec![])` clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub tags: Option<Vec<NameRef>>,
    pub ingredients: Option<Vec<NameRef>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_price_serializes_as_string() {
        let recipe = Recipe {
            id: 1,
            title: "Sample recipe".into(),
            time_minutes: 22,
            price: Decimal::from_str("5.25").unwrap(),
            link: String::new(),
            tags: vec![],
            ingredients: vec![],
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["price"], "5.25");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_create_ignores_user_and_defaults_lists() {
        let payload: RecipeCreate = serde_json::from_str(
            r#"{"title":"Soup","time_minutes":10,"price":"2.50","user":42}"#,
        )
        .unwrap();
        assert_eq!(payload.title, "Soup");
        assert!(payload.tags.is_empty());
        assert!(payload.ingredients.is_empty());
        assert!(payload.description.is_none());
    }

    #[test]
    fn test_update_distinguishes_absent_and_empty_tags() {
        let absent: RecipeUpdate = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert!(absent.tags.is_none());

        let empty: RecipeUpdate = serde_json::from_str(r#"{"tags":[]}"#).unwrap();
        assert_eq!(empty.tags, Some(vec![]));
    }

    #[test]
    fn test_into_summary_drops_description() {
        let detail = RecipeDetail {
            id: 7,
            title: "Curry".into(),
            time_minutes: 30,
            price: Decimal::new(1250, 2),
            link: "https://example.com/curry".into(),
            tags: vec![Tag { id: 1, name: "Indian".into() }],
            ingredients: vec![],
            description: "Spicy".into(),
        };
        let summary = detail.into_summary();
        assert_eq!(summary.id, 7);
        assert_eq!(summary.tags.len(), 1);
    }
}
