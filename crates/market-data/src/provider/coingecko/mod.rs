//! CoinGecko market data source.
//!
//! Fetches the top crypto assets by market cap from the public
//! `/coins/markets` endpoint, including 1h / 24h / 7d price changes.
//!
//! The free tier is limited to roughly 30 calls per minute. A demo API key
//! can be passed with [`CoinGeckoProvider::with_api_key`].
//! API documentation: https://docs.coingecko.com/reference/coins-markets

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::RawAssetRecord;
use crate::provider::MarketDataSource;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";

/// CoinGecko caps `per_page` at 250.
pub const MAX_PER_PAGE: u32 = 250;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Prices from 1e26 up leave no room for two decimals in a `Decimal`.
const PRICE_LIMIT: i128 = 100_000_000_000_000_000_000_000_000;

// ============================================================================
// API Response Structures
// ============================================================================

/// One element of the `/coins/markets` array.
#[derive(Debug, Deserialize)]
struct MarketItem {
    id: String,
    #[serde(default)]
    symbol: Option<String>,
    name: String,
    current_price: Option<f64>,
    price_change_percentage_1h_in_currency: Option<f64>,
    price_change_percentage_24h_in_currency: Option<f64>,
    price_change_percentage_7d_in_currency: Option<f64>,
    // Note: market_cap, total_volume, image etc. exist but are not used
}

/// Error body CoinGecko sends with 4xx answers.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

// ============================================================================
// CoinGeckoProvider
// ============================================================================

/// CoinGecko market data source.
///
/// ```ignore
/// use coinboard_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new()
///     .with_vs_currency("eur")
///     .with_per_page(50);
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    vs_currency: String,
    per_page: u32,
    api_key: Option<String>,
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoProvider {
    /// Provider against the public API, quoting in USD, 100 assets per page.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            vs_currency: "usd".to_string(),
            per_page: 100,
            api_key: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_vs_currency(mut self, vs_currency: impl Into<String>) -> Self {
        self.vs_currency = vs_currency.into().to_lowercase();
        self
    }

    /// Number of assets per fetch, clamped to `1..=MAX_PER_PAGE`.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
            ("price_change_percentage", "1h,24h,7d".to_string()),
        ]
    }

    async fn fetch(&self) -> Result<String, MarketDataError> {
        let mut request = self.client.get(self.markets_url()).query(&self.query_params());

        if let Some(api_key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", api_key);
        }

        debug!(
            "CoinGecko request: {} ({} per page, {})",
            self.markets_url(),
            self.per_page,
            self.vs_currency
        );

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_assets(&self) -> Result<Vec<RawAssetRecord>, MarketDataError> {
        let body = self.fetch().await?;
        let records = parse_markets(&body)?;
        debug!("CoinGecko returned {} assets", records.len());
        Ok(records)
    }
}

/// Decode a `/coins/markets` body into raw records, keeping the API order.
///
/// The body as a whole must be a JSON array; otherwise the response is
/// malformed. Individual entries that cannot be used (no price, negative
/// price, a price of 1e26 or more, missing name) are skipped with a warning rather than failing the
/// whole list.
pub fn parse_markets(body: &str) -> Result<Vec<RawAssetRecord>, MarketDataError> {
    let items: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let item: MarketItem = match serde_json::from_value(item) {
            Ok(item) => item,
            Err(e) => {
                warn!("Skipping undecodable CoinGecko entry: {}", e);
                continue;
            }
        };

        if let Some(record) = to_record(item) {
            records.push(record);
        }
    }

    Ok(records)
}

fn to_record(item: MarketItem) -> Option<RawAssetRecord> {
    let price = match item.current_price.and_then(to_decimal) {
        Some(price) if price < Decimal::ZERO => {
            warn!("Skipping {}: negative price {}", item.id, price);
            return None;
        }
        Some(price) if price >= Decimal::from_i128_with_scale(PRICE_LIMIT, 0) => {
            warn!("Skipping {}: price {} out of range", item.id, price);
            return None;
        }
        Some(price) => price,
        None => {
            warn!("Skipping {}: no current price", item.id);
            return None;
        }
    };

    Some(RawAssetRecord {
        id: item.id,
        symbol: item.symbol,
        name: item.name,
        price,
        change_1h: item.price_change_percentage_1h_in_currency.and_then(to_decimal),
        change_24h: item
            .price_change_percentage_24h_in_currency
            .and_then(to_decimal),
        change_7d: item.price_change_percentage_7d_in_currency.and_then(to_decimal),
    })
}

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok()
}
