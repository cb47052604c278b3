//! Amount validation
//!
//! This module turns the raw `amount` value of a request body into an exact
//! decimal that can be used in balance arithmetic without further rounding.
//!
//! The rules are applied in a fixed order and the first one that fails
//! decides the reported [`ValidationError`]:
//!
//! 1. convertible to an exact decimal, else `NotNumeric`
//! 2. not negative, else `Negative`
//! 3. not zero, else `Zero`
//! 4. at most two fraction digits in the exact representation, else `TooManyDecimals`
//! 5. not above the maximum, else `ExceedsMaximum`
//!
//! Rules 2 to 4 are decided on the digits as written, before conversion to
//! [`Decimal`], so an input that is too large or too precise for the decimal
//! type is still classified by the rule it actually breaks.

use crate::types::{max_amount, normalize_balance, ValidationError, AMOUNT_SCALE};
use rust_decimal::Decimal;
use serde_json::Value;
use std::borrow::Cow;

/// Validates raw amounts for deposits and withdrawals
#[derive(Debug, Clone)]
pub struct AmountValidator {
    maximum: Decimal,
}

impl AmountValidator {
    /// Create a validator with a custom upper bound
    pub fn with_maximum(maximum: Decimal) -> Self {
        AmountValidator { maximum }
    }

    /// Validate a raw request value
    ///
    /// # Arguments
    ///
    /// * `raw` - The value of the `amount` field (number, string, or anything else)
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The amount, rescaled to exactly two fraction digits
    /// * `Err(ValidationError)` - The first rule the value breaks
    pub fn validate(&self, raw: &Value) -> Result<Decimal, ValidationError> {
        let text = raw_text(raw).ok_or(ValidationError::NotNumeric)?;
        let digits = DecimalText::parse(&text).ok_or(ValidationError::NotNumeric)?;

        if digits.negative && !digits.is_zero() {
            return Err(ValidationError::Negative);
        }
        if digits.is_zero() {
            return Err(ValidationError::Zero);
        }
        if digits.scale() > i64::from(AMOUNT_SCALE) {
            return Err(ValidationError::TooManyDecimals);
        }

        // Only magnitude can make the conversion fail at this point
        let amount = digits
            .to_decimal()
            .ok_or(ValidationError::ExceedsMaximum)?;
        if amount > self.maximum {
            return Err(ValidationError::ExceedsMaximum);
        }

        Ok(normalize_balance(amount))
    }
}

impl Default for AmountValidator {
    fn default() -> Self {
        Self::with_maximum(max_amount())
    }
}

/// Convert a raw value to an exact decimal without applying any amount rule
///
/// Used for opening balances, which only have to be numeric.
pub fn parse_exact(raw: &Value) -> Result<Decimal, ValidationError> {
    let text = raw_text(raw).ok_or(ValidationError::NotNumeric)?;
    DecimalText::parse(&text)
        .and_then(|digits| digits.to_decimal())
        .ok_or(ValidationError::NotNumeric)
}

/// Textual form of a raw value, if it can possibly be numeric
fn raw_text(raw: &Value) -> Option<Cow<'_, str>> {
    match raw {
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::String(text) => Some(Cow::Borrowed(text.trim())),
        _ => None,
    }
}

/// A decimal literal split into its parts, digits kept exactly as written
#[derive(Debug, PartialEq)]
struct DecimalText<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
}

impl<'a> DecimalText<'a> {
    /// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one
    /// mantissa digit on either side of the point
    fn parse(text: &'a str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(position) => {
                let exponent = &unsigned[position + 1..];
                let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
                if !is_digits(digits) || digits.is_empty() {
                    return None;
                }
                // Exponents too long for i64 saturate in their own direction
                let saturated = if exponent.starts_with('-') { i64::MIN } else { i64::MAX };
                (&unsigned[..position], exponent.parse::<i64>().unwrap_or(saturated))
            }
            None => (unsigned, 0),
        };

        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        if !is_digits(integer) || !is_digits(fraction) {
            return None;
        }

        Some(DecimalText {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    fn is_zero(&self) -> bool {
        self.integer
            .bytes()
            .chain(self.fraction.bytes())
            .all(|digit| digit == b'0')
    }

    /// Fraction digits of the exact value, negative for trailing zeros
    /// implied by a positive exponent
    fn scale(&self) -> i64 {
        (self.fraction.len() as i64).saturating_sub(self.exponent)
    }

    /// Exact conversion; `None` if the value does not fit a [`Decimal`]
    fn to_decimal(&self) -> Option<Decimal> {
        let mut canonical = String::with_capacity(self.integer.len() + self.fraction.len() + 24);
        if self.negative {
            canonical.push('-');
        }
        canonical.push_str(if self.integer.is_empty() { "0" } else { self.integer });
        if !self.fraction.is_empty() {
            canonical.push('.');
            canonical.push_str(self.fraction);
        }

        if self.exponent == 0 {
            Decimal::from_str_exact(&canonical).ok()
        } else {
            canonical.push('e');
            canonical.push_str(&self.exponent.to_string());
            Decimal::from_scientific(&canonical).ok()
        }
    }
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}
