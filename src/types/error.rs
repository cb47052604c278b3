//! Error types for the bank accounts service
//!
//! This module defines every error a request can end in. The `Display`
//! strings of [`AccountError`] are the exact messages returned to API
//! callers, so they must not be reworded.
//!
//! # Error Categories
//!
//! - **Payload Errors**: missing or malformed JSON bodies
//! - **Lookup Errors**: unknown account numbers
//! - **Validation Errors**: amounts that break the precision, sign or bound rules
//! - **Balance Errors**: withdrawals larger than the current balance
//! - **Storage Errors**: failures of the persistence layer (internal)

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Balance mutation being performed
///
/// Only used to pick the prefix of the precision-related messages
/// ("Deposit failed - ..." versus "Withdrawal failed - ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdrawal,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Deposit => "Deposit",
            Operation::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reason a raw amount was rejected
///
/// Variants are listed in the order the rules are applied; the first rule
/// that fails decides the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Not convertible to an exact decimal number
    #[error("amount is not numeric")]
    NotNumeric,

    /// Strictly below zero
    #[error("amount is negative")]
    Negative,

    /// Exactly zero, in any scale
    #[error("amount is zero")]
    Zero,

    /// More than two digits after the decimal point
    #[error("amount has more than two decimal places")]
    TooManyDecimals,

    /// Above the configured maximum
    #[error("amount exceeds the maximum")]
    ExceedsMaximum,
}

impl ValidationError {
    /// Caller-facing message for this rejection during `operation`
    pub fn message(&self, operation: &Operation) -> String {
        match self {
            ValidationError::NotNumeric => format!(
                "{} failed - Amount must be numeric and have at most 2 decimal places",
                operation
            ),
            ValidationError::Negative => "Amount cannot be negative".to_string(),
            ValidationError::Zero => "Amount must be greater than zero".to_string(),
            ValidationError::TooManyDecimals => {
                format!("{} failed - Amount must have at most 2 decimal places", operation)
            }
            ValidationError::ExceedsMaximum => "Amount exceeds maximum allowed value".to_string(),
        }
    }
}

/// Failure reported by an [`AccountStore`](crate::core::AccountStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite reported an error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The account number is already taken
    ///
    /// Recoverable: account creation retries with a fresh number.
    #[error("Account number {account_number} already exists")]
    DuplicateAccountNumber { account_number: String },

    /// A persisted balance could not be read back as a decimal
    #[error("Stored balance '{value}' for account {account_number} is not a valid decimal")]
    InvalidBalance {
        account_number: String,
        value: String,
    },

    /// A thread panicked while holding the storage lock
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Main error type for account operations
///
/// Everything except [`AccountError::Storage`], [`AccountError::Task`] and
/// [`AccountError::AccountNumbersExhausted`] is caused by the request itself
/// and is terminal: retrying the same request yields the same error.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Request body is missing or is not a JSON object
    #[error("Invalid or missing JSON payload")]
    MalformedPayload,

    /// Deposit/withdraw body is missing, not an object, or has no `amount`
    #[error("Invalid or missing JSON payload or 'amount'")]
    MissingAmount,

    /// No account has this number
    #[error("Account not found")]
    AccountNotFound { account_number: String },

    /// The amount failed validation
    #[error("{}", .kind.message(.operation))]
    InvalidAmount {
        operation: Operation,
        kind: ValidationError,
    },

    /// Withdrawal larger than the current balance
    ///
    /// The account is left unchanged.
    #[error("Insufficient balance")]
    InsufficientBalance {
        account_number: String,
        balance: Decimal,
        requested: Decimal,
    },

    /// Every generated account number collided with an existing one
    #[error("Could not allocate a unique account number after {attempts} attempts")]
    AccountNumbersExhausted { attempts: u32 },

    /// The store failed (internal)
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The blocking task running a store call panicked or was cancelled (internal)
    #[error("Account task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// Helper functions for creating common errors

impl AccountError {
    /// Create an AccountNotFound error
    pub fn not_found(account_number: &str) -> Self {
        AccountError::AccountNotFound {
            account_number: account_number.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: Operation, kind: ValidationError) -> Self {
        AccountError::InvalidAmount { operation, kind }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(account_number: &str, balance: Decimal, requested: Decimal) -> Self {
        AccountError::InsufficientBalance {
            account_number: account_number.to_string(),
            balance,
            requested,
        }
    }

    /// Whether this error is caused by the infrastructure rather than the request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AccountError::Storage(_)
                | AccountError::Task(_)
                | AccountError::AccountNumbersExhausted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::malformed_payload(AccountError::MalformedPayload, "Invalid or missing JSON payload")]
    #[case::missing_amount(
        AccountError::MissingAmount,
        "Invalid or missing JSON payload or 'amount'"
    )]
    #[case::not_found(AccountError::not_found("0000"), "Account not found")]
    #[case::deposit_not_numeric(
        AccountError::invalid_amount(Operation::Deposit, ValidationError::NotNumeric),
        "Deposit failed - Amount must be numeric and have at most 2 decimal places"
    )]
    #[case::withdrawal_not_numeric(
        AccountError::invalid_amount(Operation::Withdrawal, ValidationError::NotNumeric),
        "Withdrawal failed - Amount must be numeric and have at most 2 decimal places"
    )]
    #[case::negative(
        AccountError::invalid_amount(Operation::Deposit, ValidationError::Negative),
        "Amount cannot be negative"
    )]
    #[case::zero(
        AccountError::invalid_amount(Operation::Withdrawal, ValidationError::Zero),
        "Amount must be greater than zero"
    )]
    #[case::deposit_too_many_decimals(
        AccountError::invalid_amount(Operation::Deposit, ValidationError::TooManyDecimals),
        "Deposit failed - Amount must have at most 2 decimal places"
    )]
    #[case::withdrawal_too_many_decimals(
        AccountError::invalid_amount(Operation::Withdrawal, ValidationError::TooManyDecimals),
        "Withdrawal failed - Amount must have at most 2 decimal places"
    )]
    #[case::exceeds_maximum(
        AccountError::invalid_amount(Operation::Deposit, ValidationError::ExceedsMaximum),
        "Amount exceeds maximum allowed value"
    )]
    #[case::insufficient_balance(
        AccountError::insufficient_balance("1234", Decimal::new(3000, 2), Decimal::new(100000, 2)),
        "Insufficient balance"
    )]
    fn test_error_display(#[case] error: AccountError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_storage_errors_are_internal() {
        let error: AccountError = StoreError::Poisoned.into();
        assert!(error.is_internal());
        assert!(AccountError::AccountNumbersExhausted { attempts: 32 }.is_internal());
        assert!(!AccountError::not_found("1").is_internal());
    }

    #[test]
    fn test_rusqlite_error_conversion() {
        let error: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(error, StoreError::Database(_)));
        assert!(error.to_string().starts_with("Database error:"));
    }
}
