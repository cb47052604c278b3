//! Benchmark suite for amount validation and balance updates
//!
//! Uses the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```

use bank_accounts_api::{AccountService, AmountValidator, InMemoryAccountStore};
use serde_json::{json, Value};

fn main() {
    divan::main();
}

/// Representative raw amounts: valid numbers, valid strings, and each rejection
fn raw_amounts() -> Vec<Value> {
    vec![
        json!(50),
        json!(19.99),
        json!("12.3"),
        json!("1e2"),
        json!("abc"),
        json!(-5),
        json!(0),
        json!(1.005),
        json!(100000000),
    ]
}

/// Validate a mixed batch of raw amounts
#[divan::bench]
fn validate_mixed_amounts(bencher: divan::Bencher) {
    let validator = AmountValidator::default();
    let amounts = raw_amounts();

    bencher.bench(|| {
        amounts
            .iter()
            .filter(|raw| validator.validate(divan::black_box(raw)).is_ok())
            .count()
    });
}

/// Deposit then withdraw on a single in-memory account
#[divan::bench]
fn deposit_withdraw_in_memory(bencher: divan::Bencher) {
    let service = AccountService::new(InMemoryAccountStore::new());
    let number = service
        .create_account(None)
        .expect("Account creation failed")
        .account_number;
    let amount = json!("10.50");

    bencher.bench(|| {
        service
            .deposit(&number, Some(&amount))
            .expect("Deposit failed");
        service
            .withdraw(&number, Some(&amount))
            .expect("Withdrawal failed")
    });
}
