//! HTTP handlers
//!
//! - `POST /accounts` - Create an account
//! - `GET /accounts/{account_number}/balance` - Read the balance
//! - `POST /accounts/{account_number}/deposit` - Deposit an amount
//! - `POST /accounts/{account_number}/withdraw` - Withdraw an amount
//!
//! Handlers only translate between HTTP and [`AccountService`]; the order
//! of checks (account exists, then amount, then balance) is decided by the
//! service, which is why deposit and withdraw hand over the raw `amount`
//! without looking at it.
//!
//! Store calls are synchronous, and SQLite may touch the disk, so each
//! service call runs on the blocking thread pool.

use crate::api::dto::{parse_object, AccountResponse, BalanceResponse};
use crate::core::{parse_exact, AccountService, AccountStore};
use crate::types::AccountError;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

/// Shared handler state
pub type SharedService<S> = Arc<AccountService<S>>;

/// Run one service call off the async worker threads
async fn run_blocking<S, T, F>(service: SharedService<S>, call: F) -> Result<T, AccountError>
where
    S: AccountStore + 'static,
    T: Send + 'static,
    F: FnOnce(&AccountService<S>) -> Result<T, AccountError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&service)).await?
}

/// POST /accounts - Create a new account
///
/// Body: `{"balance"?: number}`. A missing, `null` or absent balance opens
/// the account at 0.00.
///
/// # Response
///
/// - `201 Created` - `{"account_number": "...", "balance": 0.0}`
/// - `400 Bad Request` - body is not a JSON object, or the balance is not numeric
pub async fn create_account<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<AccountResponse>), AccountError> {
    let payload = parse_object(&body).ok_or(AccountError::MalformedPayload)?;

    let opening_balance = match payload.get("balance") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(parse_exact(raw).map_err(|_| AccountError::MalformedPayload)?),
    };

    let account = run_blocking(service, move |service| service.create_account(opening_balance)).await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// GET /accounts/{account_number}/balance
pub async fn get_balance<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(account_number): Path<String>,
) -> Result<Json<BalanceResponse>, AccountError> {
    let balance = run_blocking(service, move |service| service.get_balance(&account_number)).await?;
    Ok(Json(BalanceResponse { balance }))
}

/// POST /accounts/{account_number}/deposit
///
/// Body: `{"amount": number | string}`
pub async fn deposit<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(account_number): Path<String>,
    body: Bytes,
) -> Result<Json<BalanceResponse>, AccountError> {
    let raw_amount = parse_object(&body).and_then(|mut fields| fields.remove("amount"));

    let balance = run_blocking(service, move |service| {
        service.deposit(&account_number, raw_amount.as_ref())
    })
    .await?;
    Ok(Json(BalanceResponse { balance }))
}

/// POST /accounts/{account_number}/withdraw
///
/// Body: `{"amount": number | string}`
pub async fn withdraw<S: AccountStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(account_number): Path<String>,
    body: Bytes,
) -> Result<Json<BalanceResponse>, AccountError> {
    let raw_amount = parse_object(&body).and_then(|mut fields| fields.remove("amount"));

    let balance = run_blocking(service, move |service| {
        service.withdraw(&account_number, raw_amount.as_ref())
    })
    .await?;
    Ok(Json(BalanceResponse { balance }))
}
