//! Request and response bodies
//!
//! Request bodies are read as raw bytes and inspected field by field, so a
//! bad body can be reported with the message that fits the endpoint instead
//! of a generic extractor rejection.

use crate::types::Account;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// Body of `POST /accounts` responses
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub account_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_number: account.account_number,
            balance: account.balance,
        }
    }
}

/// Body of balance, deposit and withdraw responses
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Parse a request body as a JSON object
///
/// Returns `None` for an empty body, invalid JSON, or any JSON value that is
/// not an object.
pub fn parse_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body).ok()? {
        Value::Object(fields) => Some(fields),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty(b"")]
    #[case::invalid(b"{not json")]
    #[case::array(b"[1, 2]")]
    #[case::number(b"42")]
    #[case::null(b"null")]
    fn test_parse_object_rejects(#[case] body: &[u8]) {
        assert!(parse_object(body).is_none());
    }

    #[test]
    fn test_parse_object_keeps_fields() {
        let fields = parse_object(br#"{"amount": "12.3"}"#).unwrap();
        assert_eq!(fields.get("amount"), Some(&Value::String("12.3".to_string())));
    }

    #[test]
    fn test_balance_renders_as_number() {
        let body = serde_json::to_value(BalanceResponse {
            balance: Decimal::new(3000, 2),
        })
        .unwrap();

        assert_eq!(body["balance"].as_f64(), Some(30.0));
    }
}
