//! Coinboard Core - asset list, favorites and filter state.
//!
//! This crate turns raw market records into display rows, keeps the set of
//! favorite assets and writes it through a [`storage::KeyValueStore`], and
//! exposes the filtered list to whatever draws it. It knows nothing about
//! HTTP or disk; the `market-data` and `storage` crates plug into its traits.

pub mod asset_list;
pub mod assets;
pub mod constants;
pub mod errors;
pub mod favorites;
pub mod storage;
pub mod utils;

pub use asset_list::{AssetListViewModel, ListStatus, LoadState};
pub use assets::DisplayAsset;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
