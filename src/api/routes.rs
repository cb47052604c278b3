//! Route configuration
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | /accounts | `create_account` |
//! | GET | /accounts/{account_number}/balance | `get_balance` |
//! | POST | /accounts/{account_number}/deposit | `deposit` |
//! | POST | /accounts/{account_number}/withdraw | `withdraw` |

use crate::api::handlers::{create_account, deposit, get_balance, withdraw};
use crate::core::{AccountService, AccountStore};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the router for an account service
///
/// Requests are traced and CORS is permissive, so browser clients on any
/// origin can call the API.
pub fn create_router<S: AccountStore + 'static>(service: AccountService<S>) -> Router {
    Router::new()
        .route("/accounts", post(create_account::<S>))
        .route("/accounts/{account_number}/balance", get(get_balance::<S>))
        .route("/accounts/{account_number}/deposit", post(deposit::<S>))
        .route("/accounts/{account_number}/withdraw", post(withdraw::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(service))
}
