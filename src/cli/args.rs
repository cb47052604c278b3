use crate::core::AccountNumberGenerator;
use clap::{Parser, ValueEnum};
use thiserror::Error;

/// Serve the bank accounts HTTP API
#[derive(Parser, Debug)]
#[command(name = "bank-accounts-api")]
#[command(about = "HTTP API for bank accounts with deposits and withdrawals", long_about = None)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Account storage backend
    #[arg(
        long = "store",
        value_name = "STORE",
        env = "ACCOUNT_STORE",
        default_value = "memory",
        help = "Account store: 'memory' (lost on exit) or 'sqlite' (needs --database-url)"
    )]
    pub store: StoreType,

    /// SQLite database path
    #[arg(
        long = "database-url",
        value_name = "PATH",
        env = "DATABASE_URL",
        help = "SQLite database file, or ':memory:'"
    )]
    pub database_url: Option<String>,

    /// Width of generated account numbers
    #[arg(
        long = "account-number-digits",
        value_name = "DIGITS",
        env = "ACCOUNT_NUMBER_DIGITS",
        default_value_t = AccountNumberGenerator::DEFAULT_DIGITS,
        help = "Digits per generated account number (clamped to 4-18)"
    )]
    pub account_number_digits: u32,
}

/// Available account stores
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreType {
    Memory,
    Sqlite,
}

/// Invalid combination of arguments
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("--database-url (or DATABASE_URL) is required with --store sqlite")]
    MissingDatabaseUrl,
}

impl ServerArgs {
    /// Check combinations clap cannot express on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store == StoreType::Sqlite && self.database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        Ok(())
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn number_generator(&self) -> AccountNumberGenerator {
        AccountNumberGenerator::new(self.account_number_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::explicit_memory(&["program", "--store", "memory"], StoreType::Memory)]
    #[case::explicit_sqlite(
        &["program", "--store", "sqlite", "--database-url", "accounts.db"],
        StoreType::Sqlite
    )]
    fn test_store_parsing(#[case] args: &[&str], #[case] expected: StoreType) {
        let parsed = ServerArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.store, expected);
    }

    #[test]
    fn test_bind_address() {
        let parsed =
            ServerArgs::try_parse_from(["program", "--host", "127.0.0.1", "--port", "8080"]).unwrap();
        assert_eq!(parsed.bind_address(), "127.0.0.1:8080");
    }

    #[rstest]
    #[case::custom(&["program", "--account-number-digits", "12"], 12)]
    #[case::clamped(&["program", "--account-number-digits", "2"], 4)]
    fn test_number_generator(#[case] args: &[&str], #[case] expected_digits: u32) {
        let parsed = ServerArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.number_generator().digits(), expected_digits);
    }

    #[rstest]
    #[case::sqlite_without_path(
        &["program", "--store", "sqlite"],
        Err(ConfigError::MissingDatabaseUrl)
    )]
    #[case::sqlite_with_path(&["program", "--store", "sqlite", "--database-url", ":memory:"], Ok(()))]
    #[case::memory(&["program", "--store", "memory"], Ok(()))]
    fn test_validate(#[case] args: &[&str], #[case] expected: Result<(), ConfigError>) {
        // DATABASE_URL from the environment would mask the missing flag
        if std::env::var_os("DATABASE_URL").is_some() {
            return;
        }
        let parsed = ServerArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.validate(), expected);
    }

    // Error handling tests
    #[rstest]
    #[case::invalid_store(&["program", "--store", "postgres"])]
    #[case::invalid_port(&["program", "--port", "not-a-port"])]
    #[case::port_out_of_range(&["program", "--port", "70000"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(ServerArgs::try_parse_from(args).is_err());
    }
}
