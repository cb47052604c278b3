//! Account-related types for the bank accounts service
//!
//! This module defines the persisted Account record and the shape of an
//! account that has not been stored yet.

use rust_decimal::Decimal;

use super::amount::normalize_balance;

/// Storage-assigned surrogate key
pub type AccountId = i64;

/// System-generated, caller-facing account identifier
pub type AccountNumber = String;

/// A persisted bank account
///
/// The `account_number` is unique across all accounts and never chosen by
/// the caller. The `balance` always carries exactly two fraction digits.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Surrogate id assigned by the store on insert
    pub id: AccountId,

    /// Unique identifier exposed to API callers
    pub account_number: AccountNumber,

    /// Current balance (scale 2)
    pub balance: Decimal,
}

impl Account {
    /// Build a persisted account from its stored parts
    ///
    /// The balance is rescaled to two fraction digits so that every account
    /// handed out by a store compares and renders the same way.
    pub fn new(id: AccountId, account_number: impl Into<AccountNumber>, balance: Decimal) -> Self {
        Account {
            id,
            account_number: account_number.into(),
            balance: normalize_balance(balance),
        }
    }
}

/// An account about to be inserted, before the store assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub account_number: AccountNumber,
    pub balance: Decimal,
}

impl NewAccount {
    pub fn new(account_number: impl Into<AccountNumber>, balance: Decimal) -> Self {
        NewAccount {
            account_number: account_number.into(),
            balance: normalize_balance(balance),
        }
    }

    /// Attach the surrogate id assigned by the store
    pub fn into_account(self, id: AccountId) -> Account {
        Account::new(id, self.account_number, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_rescales_balance() {
        let account = Account::new(1, "12345678", Decimal::new(123, 1)); // 12.3

        assert_eq!(account.balance.to_string(), "12.30");
        assert_eq!(account.balance.scale(), 2);
    }

    #[test]
    fn test_into_account_keeps_number_and_balance() {
        let account = NewAccount::new("1000", Decimal::ZERO).into_account(7);

        assert_eq!(account.id, 7);
        assert_eq!(account.account_number, "1000");
        assert_eq!(account.balance.to_string(), "0.00");
    }
}
