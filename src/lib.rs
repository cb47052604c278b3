//! Bank Accounts API Library
//! # Overview
//!
//! This library provides a small HTTP service for opening bank accounts and
//! moving money in and out of them, with exact fixed-point balances.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, errors, amount constants)
//! - [`cli`] - Process configuration from flags and environment
//! - [`core`] - Business logic components:
//!   - [`core::validator`] - Amount parsing and validation rules
//!   - [`core::account_service`] - Account creation, lookup, deposits and withdrawals
//!   - [`core::traits`] - The storage contract
//! - [`store`] - In-memory and SQLite account stores
//! - [`api`] - HTTP handlers, routing and error rendering
//!
//! # Operations
//!
//! - **Create account**: Open an account with a generated number and an optional opening balance
//! - **Get balance**: Read the current balance
//! - **Deposit**: Credit a validated amount
//! - **Withdraw**: Debit a validated amount (requires a sufficient balance)
//!
//! # Amount Rules
//!
//! Deposit and withdrawal amounts must be numeric, positive, have at most two
//! fraction digits as written, and not exceed 99,999,999. Balances always
//! carry exactly two fraction digits and never go below zero through a
//! withdrawal.

// Module declarations
pub mod api;
pub mod cli;
pub mod core;
pub mod store;
pub mod types;

pub use crate::api::create_router;
pub use crate::core::{AccountService, AccountStore, AmountValidator};
pub use crate::store::{InMemoryAccountStore, SqliteAccountStore};
pub use crate::types::{Account, AccountError, NewAccount, Operation, StoreError, ValidationError};
