//! Numeric error codes
//!
//! Each code is declared once in the table below together with its HTTP
//! status and default message. The leading digit groups codes by
//! [`ErrorCategory`](super::ErrorCategory).

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($(
        $(#[$doc:meta])*
        $variant:ident = $value:literal => $status:ident, $message:literal;
    )*) => {
        /// Error code sent to clients as a bare number
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $($(#[$doc])* $variant = $value,)*
        }

        impl ErrorCode {
            /// Default English message
            pub const fn message(&self) -> &'static str {
                match self {
                    $(Self::$variant => $message,)*
                }
            }

            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(Self::$variant => StatusCode::$status,)*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)*
                    other => Err(InvalidErrorCode(other)),
                }
            }
        }
    };
}

error_codes! {
    // 0xxx general
    ValidationFailed = 2 => BAD_REQUEST, "Validation failed";
    NotFound = 3 => NOT_FOUND, "Resource not found";
    AlreadyExists = 4 => CONFLICT, "Resource already exists";

    // 1xxx auth
    NotAuthenticated = 1001 => UNAUTHORIZED, "Authentication credentials were not provided";
    /// Unknown email, wrong password or inactive account at login
    InvalidCredentials = 1002 => UNAUTHORIZED, "Unable to authenticate with provided credentials";
    TokenExpired = 1003 => UNAUTHORIZED, "Authentication token has expired";
    TokenInvalid = 1004 => UNAUTHORIZED, "Authentication token is invalid";
    /// Valid token, but the account was deactivated since
    AccountDisabled = 1007 => UNAUTHORIZED, "Account is disabled";

    // 3xxx account
    UserNotFound = 3001 => NOT_FOUND, "User not found";
    EmailAlreadyExists = 3002 => CONFLICT, "A user with this email already exists";
    PasswordTooShort = 3003 => BAD_REQUEST, "Password is too short";

    // 4xxx recipe, 41xx tag, 42xx ingredient
    RecipeNotFound = 4001 => NOT_FOUND, "Recipe not found";
    RecipeInvalidPrice = 4002 => BAD_REQUEST, "Recipe price is invalid";
    TagNotFound = 4101 => NOT_FOUND, "Tag not found";
    IngredientNotFound = 4201 => NOT_FOUND, "Ingredient not found";

    // 9xxx system
    InternalError = 9001 => INTERNAL_SERVER_ERROR, "Internal server error";
    DatabaseError = 9002 => INTERNAL_SERVER_ERROR, "Database error";
    ConfigError = 9005 => INTERNAL_SERVER_ERROR, "Configuration error";
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A number that names no [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code {0}")]
pub struct InvalidErrorCode(pub u16);
