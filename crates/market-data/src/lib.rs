//! Coinboard Market Data Crate
//!
//! This crate provides source-agnostic fetching of crypto asset lists for
//! Coinboard.
//!
//! # Overview
//!
//! ```text
//! +--------------------+     +------------------+
//! |  MarketDataSource  | --> |  RawAssetRecord  |  (id, name, price, 1h/24h/7d)
//! +--------------------+     +------------------+
//!          ^
//!          |
//! +--------------------+
//! | CoinGeckoProvider  |  (HTTP, /coins/markets)
//! +--------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataSource`] - Trait every source implements
//! - [`RawAssetRecord`] - One asset as delivered by a source
//! - [`ChangeWindow`] - The 1h / 24h / 7d change windows
//! - [`MarketDataError`] - Fetch failures, with [`RetryClass`] classification

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{ChangeWindow, RawAssetRecord};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::MarketDataSource;
