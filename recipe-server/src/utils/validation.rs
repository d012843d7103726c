//! Input validation helpers
//!
//! Length limits mirror the column sizes of the public schema. SQLite TEXT
//! has no built-in length enforcement, so handlers check before writing.

use rust_decimal::Decimal;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Recipe titles, links, tag and ingredient names, user names
pub const MAX_NAME_LEN: usize = 255;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 5;

// ── Price limits (max 5 digits, 2 decimal places) ───────────────────

pub const PRICE_DECIMAL_PLACES: u32 = 2;
pub const PRICE_MAX_DIGITS: u32 = 5;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field(field, format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::field(
            field,
            format!(
                "{field} is too long ({} chars, max {max_len})",
                value.chars().count()
            ),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::field(
            field,
            format!("{field} is too long ({} chars, max {max_len})", v.chars().count()),
        ));
    }
    Ok(())
}

/// A field that a full update (PUT) must carry.
pub fn require_field<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::field(field, format!("{field} is required")))
}

/// Validate a price against the 5-digit / 2-decimal-place column.
pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    let normalized = price.normalize();
    if normalized.scale() > PRICE_DECIMAL_PLACES {
        return Err(AppError::with_message(
            ErrorCode::RecipeInvalidPrice,
            format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."),
        )
        .with_detail("field", "price"));
    }
    let max_whole = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;
    let limit = Decimal::from(10_i64.pow(max_whole));
    if normalized.abs().trunc() >= limit {
        return Err(AppError::with_message(
            ErrorCode::RecipeInvalidPrice,
            format!("Ensure that there are no more than {max_whole} digits before the decimal point."),
        )
        .with_detail("field", "price"));
    }
    Ok(())
}

/// Validate a password before hashing.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        )
        .with_detail("field", "password"));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::field(
            "password",
            format!("password is too long (max {MAX_PASSWORD_LEN})"),
        ));
    }
    Ok(())
}

/// Minimal shape check for an email address.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::field("email", "Enter a valid email address."));
    }
    Ok(())
}

/// Parse an integer query parameter; absent means `None`.
pub fn parse_int_param(value: Option<&str>, field: &str) -> Result<Option<i64>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::field(field, "A valid integer is required.")),
    }
}

/// Parse a comma-separated list of ids (`"1,2,3"`).
pub fn parse_id_list(value: Option<&str>, field: &str) -> Result<Vec<i64>, AppError> {
    let Some(raw) = value else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| AppError::field(field, format!("'{s}' is not a valid id.")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Vegan", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(256), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(255), "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "link", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some(String::new()), "link", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some("y".repeat(300)), "link", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_price_limits() {
        assert!(validate_price(dec("5.50")).is_ok());
        assert!(validate_price(dec("999.99")).is_ok());
        assert!(validate_price(dec("5.500")).is_ok());
        assert!(validate_price(dec("0")).is_ok());

        let err = validate_price(dec("1.234")).unwrap_err();
        assert_eq!(err.code, ErrorCode::RecipeInvalidPrice);
        assert!(validate_price(dec("1000.00")).is_err());
        assert!(validate_price(dec("-1000")).is_err());
    }

    #[test]
    fn test_password_length() {
        assert_eq!(
            validate_password("pw").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert!(validate_password("testpass123").is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@localhost").is_err());
    }

    #[test]
    fn test_parse_int_param() {
        assert_eq!(parse_int_param(None, "assigned_only").unwrap(), None);
        assert_eq!(parse_int_param(Some("1"), "assigned_only").unwrap(), Some(1));
        assert_eq!(parse_int_param(Some("0"), "assigned_only").unwrap(), Some(0));
        assert!(parse_int_param(Some("yes"), "assigned_only").is_err());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list(None, "tags").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_id_list(Some("1,2, 3"), "tags").unwrap(), vec![1, 2, 3]);
        assert!(parse_id_list(Some("1,abc"), "tags").is_err());
    }
}
