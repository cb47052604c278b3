//! Core business logic module
//!
//! This module contains the account processing components:
//! - `traits` - The storage contract the service is written against
//! - `validator` - Amount parsing and validation rules
//! - `number_generator` - Random account number candidates
//! - `account_service` - Account creation, lookup, deposits and withdrawals

pub mod account_service;
pub mod number_generator;
pub mod traits;
pub mod validator;

pub use account_service::{AccountService, MAX_NUMBER_ATTEMPTS};
pub use number_generator::{AccountNumberGenerator, NumberSource};
pub use traits::AccountStore;
pub use validator::{parse_exact, AmountValidator};
