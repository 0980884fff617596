//! Custom error types for the bank console
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for bank operations
#[derive(Error, Debug)]
pub enum BankError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console or file I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A field or amount failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login or step-up verification failed
    #[error("Invalid account number or password")]
    InvalidCredentials,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Withdrawal or transfer larger than the available balance
    #[error("Insufficient balance: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    /// The input stream ended while a prompt was waiting for a line
    #[error("Input stream closed")]
    InputClosed,
}

impl BankError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BankError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for bank operations
pub type BankResult<T> = Result<T, BankError>;
