//! HTTP API module
//!
//! Maps HTTP requests onto [`AccountService`](crate::core::AccountService)
//! calls and renders the results as JSON:
//! - `dto` - Request parsing and response bodies
//! - `error` - Status codes and `{"error": ...}` bodies for [`AccountError`](crate::types::AccountError)
//! - `handlers` - One handler per endpoint
//! - `routes` - Router construction

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
