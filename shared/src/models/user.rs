//! User Model
//!
//! Only the public profile is exchanged over the wire. The password hash
//! never leaves the server.

use serde::{Deserialize, Serialize};

/// Public user profile (`/api/user/me/`, `/api/user/create/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Profile update payload
///
/// PUT requires `email` and `name`; PATCH accepts any subset. A supplied
/// `password` is re-hashed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Token request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
