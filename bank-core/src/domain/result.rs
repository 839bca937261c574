//! Result and error types for the core library

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an input was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// A required registration field was empty (carries the field name)
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// PIN and confirmation differ
    #[error("PINs do not match")]
    PinMismatch,
    /// Date of birth is not a `YYYY-MM-DD` calendar date
    #[error("invalid date of birth (expected YYYY-MM-DD)")]
    InvalidDob,
    /// Computed age is below the configured minimum
    #[error("you must be at least {minimum} years old to open an account")]
    Underage { minimum: u32 },
    /// Amount was zero or negative
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    /// Amount has fractions of a cent
    #[error("amount can have at most 2 decimal places")]
    TooManyDecimals,
    /// Amount, or the balance it would produce, is above the account limit
    #[error("amount exceeds the account balance limit")]
    AmountTooLarge,
    /// Amount exceeds the acting account's balance
    #[error("insufficient balance")]
    InsufficientFunds,
    /// Transfer target is the acting account
    #[error("cannot transfer to your own account")]
    SelfTransfer,
    /// Not a 14-digit account number
    #[error("account number must be 14 digits")]
    MalformedAccountNumber,
}

impl ValidationReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::PinMismatch => "mismatch",
            Self::InvalidDob => "invalid_dob",
            Self::Underage { .. } => "underage",
            Self::NonPositiveAmount => "invalid_amount",
            Self::TooManyDecimals => "too_many_decimals",
            Self::AmountTooLarge => "amount_too_large",
            Self::InsufficientFunds => "insufficient_funds",
            Self::SelfTransfer => "self_transfer",
            Self::MalformedAccountNumber => "malformed_account_number",
        }
    }
}

/// Why a write collided with existing data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    #[error("username '{0}' already exists")]
    UsernameTaken(String),
}

impl ConflictReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UsernameTaken(_) => "username_taken",
        }
    }
}

/// Why a credential check failed
///
/// Unknown account and wrong PIN are kept apart for messaging only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthReason {
    #[error("account number not found")]
    AccountNotFound,
    #[error("incorrect PIN")]
    IncorrectPin,
    #[error("incorrect admin password")]
    IncorrectAdminPassword,
    #[error("please login first")]
    NotLoggedIn,
}

impl AuthReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "account_not_found",
            Self::IncorrectPin => "incorrect_pin",
            Self::IncorrectAdminPassword => "incorrect_admin_password",
            Self::NotLoggedIn => "not_logged_in",
        }
    }
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(ValidationReason),

    #[error("Conflict: {0}")]
    Conflict(ConflictReason),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(AuthReason),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a not found error for an account number
    pub fn account_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound(format!("account {}", id))
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(reason) => reason.code(),
            Self::Conflict(reason) => reason.code(),
            Self::NotFound(_) => "not_found",
            Self::Auth(reason) => reason.code(),
            Self::Storage(_) => "storage",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Other(_) => "other",
        }
    }

    /// Human-readable reason without the category prefix
    pub fn reason(&self) -> String {
        match self {
            Self::Validation(reason) => reason.to_string(),
            Self::Conflict(reason) => reason.to_string(),
            Self::NotFound(what) => format!("{} not found", what),
            Self::Auth(reason) => reason.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationReason> for Error {
    fn from(reason: ValidationReason) -> Self {
        Self::Validation(reason)
    }
}

impl From<ConflictReason> for Error {
    fn from(reason: ConflictReason) -> Self {
        Self::Conflict(reason)
    }
}

impl From<AuthReason> for Error {
    fn from(reason: AuthReason) -> Self {
        Self::Auth(reason)
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Success flag plus either data or a reason, for callers that present
/// outcomes instead of propagating them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub code: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            code: Some(code.into()),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.reason(), e.code()),
        }
    }
}
