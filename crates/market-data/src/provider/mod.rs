//! Market data source abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataSource` trait that all sources implement
//! - Concrete source implementations (CoinGecko)

mod traits;

pub mod coingecko;

pub use traits::MarketDataSource;
