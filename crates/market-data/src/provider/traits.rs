//! Market data source trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::RawAssetRecord;

/// Something that can hand out the current list of assets with prices.
///
/// Implement this trait to plug a new market data source into the asset list.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use coinboard_market_data::{MarketDataError, MarketDataSource, RawAssetRecord};
///
/// struct FixedSource(Vec<RawAssetRecord>);
///
/// #[async_trait]
/// impl MarketDataSource for FixedSource {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_assets(&self) -> Result<Vec<RawAssetRecord>, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Unique identifier for this source, like "COINGECKO".
    ///
    /// Used for logging and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the current asset list.
    ///
    /// The order of the returned records is the order the list is shown in;
    /// callers must not re-sort it.
    async fn get_assets(&self) -> Result<Vec<RawAssetRecord>, MarketDataError>;
}
