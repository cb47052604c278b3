//! Bank Accounts API server
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --port 8080
//! cargo run -- --store sqlite --database-url accounts.db
//! DATABASE_URL=accounts.db ACCOUNT_STORE=sqlite cargo run
//! ```
//!
//! # Exit Codes
//!
//! - 0: Clean shutdown (Ctrl-C)
//! - 1: Error (invalid configuration, database cannot be opened, address in use, etc.)

use bank_accounts_api::api::create_router;
use bank_accounts_api::cli::{self, ServerArgs, StoreType};
use bank_accounts_api::core::{AccountService, AccountStore, AmountValidator};
use bank_accounts_api::store::{InMemoryAccountStore, SqliteAccountStore};
use std::error::Error;
use std::process;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bank_accounts_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(args).await {
        tracing::error!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: ServerArgs) -> Result<(), Box<dyn Error>> {
    args.validate()?;

    let numbers = args.number_generator();
    let validator = AmountValidator::default();
    let address = args.bind_address();

    match (&args.store, &args.database_url) {
        (StoreType::Sqlite, Some(path)) => {
            tracing::info!(%path, "using SQLite account store");
            let store = SqliteAccountStore::open(path)?;
            serve(AccountService::with_parts(store, numbers, validator), &address).await
        }
        _ => {
            tracing::info!("using in-memory account store");
            let store = InMemoryAccountStore::new();
            serve(AccountService::with_parts(store, numbers, validator), &address).await
        }
    }
}

async fn serve<S: AccountStore + 'static>(
    service: AccountService<S>,
    address: &str,
) -> Result<(), Box<dyn Error>> {
    let app = create_router(service);

    let listener = TcpListener::bind(address).await?;
    tracing::info!("Bank accounts API listening on http://{}", address);
    tracing::info!("  POST /accounts");
    tracing::info!("  GET  /accounts/{{account_number}}/balance");
    tracing::info!("  POST /accounts/{{account_number}}/deposit");
    tracing::info!("  POST /accounts/{{account_number}}/withdraw");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Bank accounts API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
