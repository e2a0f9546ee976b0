//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use rust_decimal::Decimal;
use shared::error::ErrorCode;

use super::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category, client, user attribution
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_text(value, field, max_len)
}

/// Validate that a string is within the length limit.
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
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
    match value {
        Some(v) => validate_text(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate a ledger amount is strictly positive
pub fn validate_positive_amount(value: Decimal, field: &str) -> Result<(), AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::TransactionInvalidAmount,
            format!("{field} must be positive, got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a money amount is not negative
pub fn validate_non_negative(value: Decimal, field: &str, code: ErrorCode) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(
            AppError::with_message(code, format!("{field} must be non-negative, got {value}"))
                .with_detail("field", field),
        );
    }
    Ok(())
}
