//! SQLite account store
//!
//! Accounts live in a single `accounts` table. Balances are stored as
//! canonical decimal text with two fraction digits, never as `REAL`, so the
//! value read back is exactly the value that was validated and written.
//!
//! The connection sits behind a mutex. Every operation takes the guard for
//! its own duration only, so the connection is released on every exit path,
//! errors included.

use crate::core::AccountStore;
use crate::types::{normalize_balance, Account, AccountError, NewAccount, StoreError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, TransactionBehavior};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const SELECT_BY_NUMBER: &str =
    "SELECT id, account_number, balance FROM accounts WHERE account_number = ?1";

/// SQLite-backed account store
#[derive(Debug)]
pub struct SqliteAccountStore {
    conn: Mutex<Connection>,
}

impl SqliteAccountStore {
    /// Open (or create) the database at `path` and ensure the schema exists
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened account database");
        Self::with_connection(conn)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_number TEXT NOT NULL UNIQUE,
                balance TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn select_by_number(conn: &Connection, account_number: &str) -> Result<Option<Account>, StoreError> {
        let row = conn
            .query_row(SELECT_BY_NUMBER, params![account_number], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .optional()?;

        row.map(|(id, number, balance)| -> Result<Account, StoreError> {
            let balance = Decimal::from_str(&balance).map_err(|_| StoreError::InvalidBalance {
                account_number: number.clone(),
                value: balance.clone(),
            })?;
            Ok(Account::new(id, number, balance))
        })
        .transpose()
    }
}

fn is_unique_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

impl AccountStore for SqliteAccountStore {
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let conn = self.connection()?;
        let balance = normalize_balance(account.balance);

        match conn.execute(
            "INSERT INTO accounts (account_number, balance) VALUES (?1, ?2)",
            params![account.account_number, balance.to_string()],
        ) {
            Ok(_) => Ok(account.into_account(conn.last_insert_rowid())),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateAccountNumber {
                account_number: account.account_number,
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError> {
        let conn = self.connection()?;
        Self::select_by_number(&conn, account_number)
    }

    fn persist(&self, account: &Account) -> Result<(), StoreError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO accounts (id, account_number, balance) VALUES (?1, ?2, ?3)
             ON CONFLICT(account_number) DO UPDATE SET balance = excluded.balance",
            params![
                account.id,
                account.account_number,
                normalize_balance(account.balance).to_string()
            ],
        )?;
        Ok(())
    }

    fn update<T, F>(&self, account_number: &str, f: F) -> Result<Option<T>, AccountError>
    where
        F: FnOnce(&mut Account) -> Result<T, AccountError>,
    {
        let mut conn = self.connection()?;

        // IMMEDIATE takes the write lock up front so no other writer can
        // slip in between the read and the write. Dropping the transaction
        // without commit rolls it back.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;

        let Some(mut account) = Self::select_by_number(&tx, account_number)? else {
            return Ok(None);
        };

        let value = f(&mut account)?;

        tx.execute(
            "UPDATE accounts SET balance = ?1 WHERE id = ?2",
            params![normalize_balance(account.balance).to_string(), account.id],
        )
        .map_err(StoreError::from)?;
        tx.commit().map_err(StoreError::from)?;

        Ok(Some(value))
    }
}
