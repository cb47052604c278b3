//! Monetary amount constants and balance normalisation
//!
//! Balances and validated amounts are fixed-point decimals with exactly
//! [`AMOUNT_SCALE`] fraction digits. Nothing in the crate stores money in a
//! binary floating-point type.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fraction digits carried by every balance and amount
pub const AMOUNT_SCALE: u32 = 2;

/// Largest accepted deposit or withdrawal, in whole units
pub const MAX_AMOUNT_UNITS: i64 = 99_999_999;

/// Largest accepted deposit or withdrawal as a decimal
pub fn max_amount() -> Decimal {
    Decimal::new(MAX_AMOUNT_UNITS, 0)
}

/// Rescale a balance to exactly two fraction digits
///
/// Callers only pass values whose scale is already at most two, so this
/// pads with zeros (`12.3` becomes `12.30`) and never rounds.
pub fn normalize_balance(mut balance: Decimal) -> Decimal {
    balance.rescale(AMOUNT_SCALE);
    balance
}

/// Rescale a balance to two fraction digits, or `None` if it cannot carry them
///
/// A [`Decimal`] has 96 bits of mantissa, so values within two orders of
/// magnitude of [`Decimal::MAX`] cannot be held with two fraction digits, and
/// arithmetic on them rounds instead of failing. Such a value is not a valid
/// balance.
pub fn exact_balance(balance: Decimal) -> Option<Decimal> {
    let balance = normalize_balance(balance);
    (balance.scale() == AMOUNT_SCALE).then_some(balance)
}

/// Round an opening balance to two fraction digits, half away from zero
///
/// Opening balances are not held to the deposit rules, so a value such as
/// `10.005` is accepted and stored as `10.01`. Returns `None` when the
/// rounded value is too large to keep two fraction digits.
pub fn round_opening_balance(balance: Decimal) -> Option<Decimal> {
    exact_balance(balance.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero))
}
