//! Utilities - shared error types, logging and input validation
//!
//! - [`AppError`] - application error (from shared::error)
//! - [`AppJson`], [`AppQuery`], [`AppPath`] - extractors that reject with [`AppError`]
//! - logging and validation helpers

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{
    ApiResponse, AppError, AppJson, AppPath, AppQuery, AppResult, ErrorCategory, ErrorCode,
};
