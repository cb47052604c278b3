//! Core trait for account persistence
//!
//! This module defines the storage contract the account service is written
//! against, so that the in-memory and SQLite stores can be used
//! interchangeably.

use crate::types::{Account, AccountError, NewAccount, StoreError};

/// Trait for persisting accounts
///
/// Implementations must keep `account_number` unique: `insert` fails with
/// [`StoreError::DuplicateAccountNumber`] rather than overwriting.
pub trait AccountStore: Send + Sync {
    /// Insert a new account and return it with its assigned id
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Look up an account by its number
    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError>;

    /// Write back a mutated account, creating it if it has vanished
    fn persist(&self, account: &Account) -> Result<(), StoreError>;

    /// Read-modify-write a single account
    ///
    /// Returns `Ok(None)` without calling `f` when no account has this
    /// number. The account is persisted only when `f` returns `Ok`; on error
    /// the stored row is left untouched.
    ///
    /// The default is a plain lookup followed by a write, which can lose an
    /// update when two requests race on the same account. Stores that can
    /// lock a single row should override it.
    fn update<T, F>(&self, account_number: &str, f: F) -> Result<Option<T>, AccountError>
    where
        F: FnOnce(&mut Account) -> Result<T, AccountError>,
    {
        let Some(mut account) = self.find_by_number(account_number)? else {
            return Ok(None);
        };

        let value = f(&mut account)?;
        self.persist(&account)?;

        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryAccountStore;
    use rust_decimal::Decimal;

    /// Delegates storage but keeps the default read-then-write `update`
    struct PlainStore(InMemoryAccountStore);

    impl AccountStore for PlainStore {
        fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
            self.0.insert(account)
        }

        fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError> {
            self.0.find_by_number(account_number)
        }

        fn persist(&self, account: &Account) -> Result<(), StoreError> {
            self.0.persist(account)
        }
    }

    #[test]
    fn test_default_update_persists_on_success() {
        let store = PlainStore(InMemoryAccountStore::new());
        store.insert(NewAccount::new("1000", Decimal::ONE)).unwrap();

        let result = store.update("1000", |account| {
            account.balance += Decimal::new(25, 2);
            Ok(account.balance)
        });

        assert_eq!(result.unwrap(), Some(Decimal::new(125, 2)));
        let stored = store.find_by_number("1000").unwrap().unwrap();
        assert_eq!(stored.balance.to_string(), "1.25");
    }

    #[test]
    fn test_default_update_skips_persist_on_error() {
        let store = PlainStore(InMemoryAccountStore::new());
        store.insert(NewAccount::new("1000", Decimal::ONE)).unwrap();

        let result = store.update("1000", |account| -> Result<(), AccountError> {
            account.balance = Decimal::ZERO;
            Err(AccountError::MissingAmount)
        });

        assert!(matches!(result, Err(AccountError::MissingAmount)));
        let stored = store.find_by_number("1000").unwrap().unwrap();
        assert_eq!(stored.balance.to_string(), "1.00");
    }

    #[test]
    fn test_default_update_missing_account() {
        let store = PlainStore(InMemoryAccountStore::new());
        assert!(matches!(store.update("1000", |_| Ok(())), Ok(None)));
    }
}
