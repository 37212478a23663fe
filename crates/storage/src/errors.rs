//! Storage-specific error types.
//!
//! These wrap file system, Diesel and r2d2 errors and convert them to the
//! backend-agnostic [`PersistenceError`] defined in `coinboard_core`.

use coinboard_core::errors::{Error, PersistenceError};
use diesel::result::Error as DieselError;
use thiserror::Error;

/// Errors internal to the storage layer. Converted to
/// `coinboard_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Corrupted store file: {0}")]
    Corrupted(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        let persistence = match err {
            StorageError::Corrupted(msg) => PersistenceError::Corrupted(msg),
            StorageError::SerializationError(msg) => PersistenceError::Serialization(msg),
            other => PersistenceError::Unavailable(other.to_string()),
        };
        Error::Persistence(persistence)
    }
}
