//! HTTP API
//!
//! | Prefix | Module | Auth |
//! |--------|--------|------|
//! | /health | [`health`] | none |
//! | /api/user/ | [`users`] | create/token public, me authenticated |
//! | /api/recipe/recipes/ | [`recipes`] | authenticated |
//! | /api/recipe/tags/ | [`tags`] | authenticated |
//! | /api/recipe/ingredients/ | [`ingredients`] | authenticated |

pub mod attributes;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;
