//! Account service
//!
//! This module provides the `AccountService` that orchestrates account
//! creation, balance lookup, deposits and withdrawals on top of an
//! [`AccountStore`].
//!
//! For deposits and withdrawals the checks always run in this order, and
//! callers can observe it:
//!
//! 1. the account exists, else `AccountNotFound`
//! 2. an amount was supplied, else `MissingAmount`
//! 3. the amount is valid, else `InvalidAmount`
//! 4. (withdrawals) the balance covers the amount, else `InsufficientBalance`
//!
//! Each mutation goes through [`AccountStore::update`], so a rejected
//! operation leaves the stored balance untouched.

use crate::core::number_generator::{AccountNumberGenerator, NumberSource};
use crate::core::traits::AccountStore;
use crate::core::validator::AmountValidator;
use crate::types::{
    exact_balance, round_opening_balance, Account, AccountError, NewAccount, Operation,
    StoreError, ValidationError,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// Number of fresh account numbers tried before account creation gives up
pub const MAX_NUMBER_ATTEMPTS: u32 = 32;

/// Account operations over a store
pub struct AccountService<S, G = AccountNumberGenerator> {
    store: S,
    numbers: G,
    validator: AmountValidator,
}

impl<S: AccountStore> AccountService<S> {
    /// Create a service with default number width and amount limits
    pub fn new(store: S) -> Self {
        Self::with_parts(store, AccountNumberGenerator::default(), AmountValidator::default())
    }
}

impl<S: AccountStore, G: NumberSource> AccountService<S, G> {
    pub fn with_parts(store: S, numbers: G, validator: AmountValidator) -> Self {
        AccountService {
            store,
            numbers,
            validator,
        }
    }

    /// Create an account with an optional opening balance
    ///
    /// The opening balance is not checked against the deposit rules; it is
    /// only rounded to two fraction digits. Without one the account starts
    /// at 0.00.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The opening balance is too large to carry two fraction digits
    /// - `MAX_NUMBER_ATTEMPTS` generated numbers all collide with existing accounts
    /// - The store fails
    pub fn create_account(&self, opening_balance: Option<Decimal>) -> Result<Account, AccountError> {
        let balance = match opening_balance {
            Some(opening) => round_opening_balance(opening).ok_or_else(|| {
                warn!(%opening, "opening balance cannot be held with two fraction digits");
                AccountError::MalformedPayload
            })?,
            None => Decimal::ZERO,
        };
        if balance < Decimal::ZERO {
            warn!(%balance, "opening account with a negative balance");
        }

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let candidate = NewAccount::new(self.numbers.next_number(), balance);

            match self.store.insert(candidate) {
                Ok(account) => {
                    info!(
                        account_number = %account.account_number,
                        balance = %account.balance,
                        "account created"
                    );
                    return Ok(account);
                }
                Err(StoreError::DuplicateAccountNumber { account_number }) => {
                    debug!(%account_number, attempt, "account number taken, retrying");
                }
                Err(e) => {
                    error!(error = %e, "account creation failed");
                    return Err(e.into());
                }
            }
        }

        warn!(attempts = MAX_NUMBER_ATTEMPTS, "no free account number found");
        Err(AccountError::AccountNumbersExhausted {
            attempts: MAX_NUMBER_ATTEMPTS,
        })
    }

    /// Current balance of an account; never mutates
    pub fn get_balance(&self, account_number: &str) -> Result<Decimal, AccountError> {
        debug!(%account_number, "balance lookup");

        self.store
            .find_by_number(account_number)?
            .map(|account| account.balance)
            .ok_or_else(|| AccountError::not_found(account_number))
    }

    /// Deposit funds into an account
    ///
    /// # Arguments
    ///
    /// * `account_number` - The account to credit
    /// * `raw_amount` - The `amount` field of the request, `None` if absent
    ///
    /// # Returns
    ///
    /// The new balance, with two fraction digits
    pub fn deposit(
        &self,
        account_number: &str,
        raw_amount: Option<&Value>,
    ) -> Result<Decimal, AccountError> {
        self.apply(Operation::Deposit, account_number, raw_amount, |account, amount| {
            account
                .balance
                .checked_add(amount)
                .ok_or_else(|| AccountError::invalid_amount(Operation::Deposit, ValidationError::ExceedsMaximum))
        })
    }

    /// Withdraw funds from an account
    ///
    /// Same as [`deposit`](Self::deposit), plus the balance has to cover the
    /// amount. That check only happens once the amount itself is valid.
    pub fn withdraw(
        &self,
        account_number: &str,
        raw_amount: Option<&Value>,
    ) -> Result<Decimal, AccountError> {
        self.apply(Operation::Withdrawal, account_number, raw_amount, |account, amount| {
            if account.balance < amount {
                return Err(AccountError::insufficient_balance(
                    &account.account_number,
                    account.balance,
                    amount,
                ));
            }

            // Cannot go below zero after the check above
            Ok(account.balance - amount)
        })
    }

    /// Validate and apply one balance mutation atomically for this account
    fn apply<F>(
        &self,
        operation: Operation,
        account_number: &str,
        raw_amount: Option<&Value>,
        mutate: F,
    ) -> Result<Decimal, AccountError>
    where
        F: FnOnce(&Account, Decimal) -> Result<Decimal, AccountError>,
    {
        let outcome = self.store.update(account_number, |account| {
            let raw = raw_amount.ok_or(AccountError::MissingAmount)?;
            let amount = self
                .validator
                .validate(raw)
                .map_err(|kind| AccountError::invalid_amount(operation, kind))?;

            // Near the top of the decimal range addition rounds instead of failing
            account.balance = exact_balance(mutate(account, amount)?).ok_or_else(|| {
                AccountError::invalid_amount(operation, ValidationError::ExceedsMaximum)
            })?;
            Ok((amount, account.balance))
        });

        match outcome {
            Ok(Some((amount, balance))) => {
                info!(%account_number, %operation, %amount, %balance, "balance updated");
                Ok(balance)
            }
            Ok(None) => {
                warn!(%account_number, %operation, "account not found");
                Err(AccountError::not_found(account_number))
            }
            Err(e) if e.is_internal() => {
                error!(%account_number, %operation, error = %e, "balance update failed");
                Err(e)
            }
            Err(e) => {
                warn!(%account_number, %operation, reason = %e, "balance update rejected");
                Err(e)
            }
        }
    }
}
