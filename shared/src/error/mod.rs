//! Error scheme shared by the server and its clients
//!
//! Code ranges: 0xxx general, 1xxx auth, 3xxx account, 4xxx recipe,
//! 9xxx system.
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::field("title", "This field is required.");
//! let body = ApiResponse::from(&err);
//! assert_eq!(body.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
