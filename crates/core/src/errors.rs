//! Core error types for Coinboard.
//!
//! Storage-specific errors (file system, SQLite) are converted to
//! [`PersistenceError`] by the storage layer so this type stays
//! backend-agnostic.

use thiserror::Error;

use coinboard_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type.
///
/// None of these are fatal: a failed fetch leaves stale data on screen and a
/// failed write leaves the in-memory favorites ahead of the stored ones.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch market data: {0}")]
    DataFetch(#[from] MarketDataError),

    #[error("Favorites storage failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether asking again might help. Only fetch failures can say yes.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::DataFetch(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Backend-agnostic error type for key-value storage operations.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The backing store could not be opened, read or written.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The stored value exists but cannot be decoded.
    #[error("Stored data is corrupted: {0}")]
    Corrupted(String),

    /// A value could not be encoded for storage.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Persistence(PersistenceError::Serialization(err.to_string()))
    }
}
