//! Account store implementations
//!
//! - `memory` - concurrent in-memory store (default)
//! - `sqlite` - durable store backed by a SQLite file

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryAccountStore;
pub use sqlite::SqliteAccountStore;
