//! Mapping of account errors to HTTP responses

use crate::api::dto::ErrorResponse;
use crate::types::AccountError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl AccountError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::AccountNotFound { .. } => StatusCode::NOT_FOUND,
            AccountError::Storage(_)
            | AccountError::Task(_)
            | AccountError::AccountNumbersExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AccountError::MalformedPayload
            | AccountError::MissingAmount
            | AccountError::InvalidAmount { .. }
            | AccountError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal causes are logged, never sent to the caller
        let error = if self.is_internal() {
            tracing::error!(error = %self, "request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
