//! Thread-safe in-memory account store
//!
//! This module provides the `InMemoryAccountStore`, which keeps accounts in a
//! `DashMap` keyed by account number. It is the default store and the one
//! used by the tests.
//!
//! # Thread Safety
//!
//! `DashMap` shards its entries behind fine-grained locks. Operations on
//! different accounts proceed in parallel; [`AccountStore::update`] holds
//! the entry lock for the whole read-modify-write, so concurrent mutations
//! of one account are serialized and none is lost.

use crate::core::AccountStore;
use crate::types::{normalize_balance, Account, AccountError, AccountId, NewAccount, StoreError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory account store
#[derive(Debug)]
pub struct InMemoryAccountStore {
    /// Accounts by account number
    accounts: DashMap<String, Account>,

    /// Next surrogate id to hand out
    next_id: AtomicI64,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn allocate_id(&self) -> AccountId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        match self.accounts.entry(account.account_number.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateAccountNumber {
                account_number: account.account_number,
            }),
            Entry::Vacant(slot) => {
                let account = account.into_account(self.allocate_id());
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .get(account_number)
            .map(|entry| entry.value().clone()))
    }

    fn persist(&self, account: &Account) -> Result<(), StoreError> {
        let stored = Account::new(account.id, account.account_number.clone(), account.balance);
        self.accounts.insert(stored.account_number.clone(), stored);
        Ok(())
    }

    fn update<T, F>(&self, account_number: &str, f: F) -> Result<Option<T>, AccountError>
    where
        F: FnOnce(&mut Account) -> Result<T, AccountError>,
    {
        let Some(mut entry) = self.accounts.get_mut(account_number) else {
            return Ok(None);
        };

        // Work on a copy so a failed closure leaves the entry untouched
        let mut working = entry.value().clone();
        let value = f(&mut working)?;
        working.balance = normalize_balance(working.balance);
        *entry.value_mut() = working;

        Ok(Some(value))
    }
}
