//! Coinboard Storage - key-value backends for the favorites store.
//!
//! Two implementations of [`coinboard_core::storage::KeyValueStore`]:
//!
//! - [`FileKeyValueStore`]: one versioned JSON document on disk
//! - [`SqliteKeyValueStore`]: the `app_settings` table in a SQLite database,
//!   accessed through Diesel and an r2d2 pool
//!
//! Storage errors are converted to `coinboard_core::Error::Persistence` at the
//! crate boundary.

pub mod db;
pub mod errors;
pub mod file_store;
pub mod schema;
pub mod sqlite_store;

pub use errors::StorageError;
pub use file_store::FileKeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;
