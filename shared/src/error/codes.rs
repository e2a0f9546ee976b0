//! Unified error codes for the Alta back-office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Ledger errors (cash transactions, closings, sales)
//! - 6xxx: Catalog errors
//! - 7xxx: Client errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the admin frontend can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Ledger ====================
    /// Cash transaction not found
    TransactionNotFound = 4001,
    /// Amount is not a positive finite number
    TransactionInvalidAmount = 4002,
    /// Neither the sales record nor the ledger row could be deleted
    TransactionDeleteFailed = 4003,
    /// Cash closing not found
    ClosingNotFound = 4101,
    /// Counted amount is not a finite number
    ClosingInvalidAmount = 4102,
    /// Sale not found
    SaleNotFound = 4201,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product has invalid quantity
    ProductInvalidQuantity = 6003,

    // ==================== 7xxx: Client ====================
    /// Client not found
    ClientNotFound = 7001,
    /// Loyalty point grant is not positive
    LoyaltyInvalidPoints = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Storage corrupted (stored document cannot be decoded)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Ledger
            ErrorCode::TransactionNotFound => "Cash transaction not found",
            ErrorCode::TransactionInvalidAmount => "Amount must be a positive number",
            ErrorCode::TransactionDeleteFailed => "Transaction could not be deleted",
            ErrorCode::ClosingNotFound => "Cash closing not found",
            ErrorCode::ClosingInvalidAmount => "Counted amount must be a finite number",
            ErrorCode::SaleNotFound => "Sale not found",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductInvalidQuantity => "Product has invalid quantity",

            // Client
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::LoyaltyInvalidPoints => "Loyalty points must be positive",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageCorrupted => "Stored data could not be decoded",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Ledger
            4001 => Ok(ErrorCode::TransactionNotFound),
            4002 => Ok(ErrorCode::TransactionInvalidAmount),
            4003 => Ok(ErrorCode::TransactionDeleteFailed),
            4101 => Ok(ErrorCode::ClosingNotFound),
            4102 => Ok(ErrorCode::ClosingInvalidAmount),
            4201 => Ok(ErrorCode::SaleNotFound),

            // Catalog
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductInvalidQuantity),

            // Client
            7001 => Ok(ErrorCode::ClientNotFound),
            7002 => Ok(ErrorCode::LoyaltyInvalidPoints),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
