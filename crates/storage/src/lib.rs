//! Local Store for legalguard
//!
//! Browser-style string key-value storage, persisted in `SQLite`, plus a
//! typed accessor for the fixed history keys.

mod error;
mod kv;
mod local_history;
mod memory;
mod migrations;
mod sqlite;
#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use kv::KeyValueStore;
pub use local_history::LocalHistory;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
