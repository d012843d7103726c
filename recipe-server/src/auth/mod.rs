//! Authentication
//!
//! - [`JwtService`] - token issue and validation
//! - [`CurrentUser`] - the authenticated caller
//! - [`require_auth`] - middleware guarding `/api/` routes
//! - [`password`] - Argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{authenticate, is_public_route, require_auth};
