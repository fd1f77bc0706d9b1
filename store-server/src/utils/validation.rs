//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so every write path
//! goes through these.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product name, customer name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, notes
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone numbers

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
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
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Parse a money field: a non-negative decimal with at most two places.
pub fn validate_money(value: &str, field: &str) -> Result<Decimal, AppError> {
    let amount = Decimal::from_str(value)
        .map_err(|_| AppError::validation(format!("{field} is not a valid amount")))?;
    if amount.is_sign_negative() {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    if amount.scale() > 2 {
        return Err(AppError::validation(format!(
            "{field} has more than two decimal places"
        )));
    }
    Ok(amount)
}

/// Validate a stock / quantity count.
pub fn validate_quantity(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn money_parsing() {
        assert!(validate_money("499.99", "price").is_ok());
        assert!(validate_money("-1.00", "price").is_err());
        assert!(validate_money("1.999", "price").is_err());
        assert!(validate_money("abc", "price").is_err());
    }
}
