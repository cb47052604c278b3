//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account records and identifiers
//! - `amount`: Fixed-point amount constants and helpers
//! - `error`: Error types for account operations and storage

pub mod account;
pub mod amount;
pub mod error;

pub use account::{Account, AccountId, AccountNumber, NewAccount};
pub use amount::{exact_balance, max_amount, normalize_balance, round_opening_balance, AMOUNT_SCALE};
pub use error::{AccountError, Operation, StoreError, ValidationError};
