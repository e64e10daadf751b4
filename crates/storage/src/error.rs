//! Typed error enum for the storage layer.

use thiserror::Error;

/// Local Store failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQL / IO failure inside SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// A value could not be encoded for storage.
    #[error("serialization error for key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// Data directory could not be prepared.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Pool(_) => true,
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}
