// CLI module
// Process configuration from flags and environment variables

mod args;

pub use args::{ConfigError, ServerArgs, StoreType};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Every flag falls back to its environment variable, then to its default.
/// On invalid arguments or `--help`, clap prints a message and exits the
/// process.
pub fn parse_args() -> ServerArgs {
    ServerArgs::parse()
}
