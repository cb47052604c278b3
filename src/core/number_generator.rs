//! Account number generation
//!
//! Account numbers are short random numeric strings. Uniqueness is not
//! guaranteed here; the store rejects duplicates on insert and the account
//! service retries with a fresh number.

use crate::types::AccountNumber;
use rand::Rng;

/// Source of candidate account numbers
pub trait NumberSource: Send + Sync {
    /// Produce the next candidate number
    fn next_number(&self) -> AccountNumber;
}

/// Uniformly random account numbers of a fixed width, without leading zeros
#[derive(Debug, Clone)]
pub struct AccountNumberGenerator {
    digits: u32,
    low: u64,
    high: u64,
}

impl AccountNumberGenerator {
    pub const MIN_DIGITS: u32 = 4;
    pub const MAX_DIGITS: u32 = 18;
    pub const DEFAULT_DIGITS: u32 = 8;

    /// Create a generator for numbers `digits` wide
    ///
    /// The width is clamped to `MIN_DIGITS..=MAX_DIGITS`; with four digits
    /// there are 9,000 possible numbers, with eighteen the space is large
    /// enough that collisions are practically never retried.
    pub fn new(digits: u32) -> Self {
        let digits = digits.clamp(Self::MIN_DIGITS, Self::MAX_DIGITS);
        let low = 10u64.pow(digits - 1);
        let high = 10u64.pow(digits) - 1;

        AccountNumberGenerator { digits, low, high }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }
}

impl Default for AccountNumberGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIGITS)
    }
}

impl NumberSource for AccountNumberGenerator {
    fn next_number(&self) -> AccountNumber {
        rand::thread_rng().gen_range(self.low..=self.high).to_string()
    }
}
