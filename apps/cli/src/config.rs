use std::{path::PathBuf, time::Duration};

use coinboard_market_data::provider::coingecko::{DEFAULT_BASE_URL, MAX_PER_PAGE};
use tracing::warn;

const DEFAULT_VS_CURRENCY: &str = "usd";
const DEFAULT_PER_PAGE: u32 = 100;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_REFRESH_SECS: u64 = 60;

/// Which backend holds the favorites slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub api_key: Option<String>,
    pub vs_currency: String,
    pub per_page: u32,
    pub data_dir: PathBuf,
    pub store: StoreKind,
    /// `None` turns auto-refresh off.
    pub refresh_interval: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = var("COINBOARD_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let api_key = var("COINBOARD_API_KEY");
        let vs_currency = var("COINBOARD_VS_CURRENCY")
            .map(|v| v.to_lowercase())
            .unwrap_or_else(|| DEFAULT_VS_CURRENCY.into());

        let per_page = match var("COINBOARD_PER_PAGE").map(|v| v.parse::<u32>()) {
            None => DEFAULT_PER_PAGE,
            Some(Ok(n)) if (1..=MAX_PER_PAGE).contains(&n) => n,
            Some(_) => {
                warn!(
                    "COINBOARD_PER_PAGE must be 1..={}; using {}",
                    MAX_PER_PAGE, DEFAULT_PER_PAGE
                );
                DEFAULT_PER_PAGE
            }
        };

        let data_dir = PathBuf::from(var("COINBOARD_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into()));

        let store = match var("COINBOARD_STORE").map(|v| v.to_lowercase()).as_deref() {
            None | Some("file") => StoreKind::File,
            Some("sqlite") => StoreKind::Sqlite,
            Some(other) => {
                warn!("Unknown COINBOARD_STORE {:?}; using file", other);
                StoreKind::File
            }
        };

        let refresh_secs = match var("COINBOARD_REFRESH_SECS").map(|v| v.parse::<u64>()) {
            None => DEFAULT_REFRESH_SECS,
            Some(Ok(n)) => n,
            Some(Err(_)) => {
                warn!(
                    "COINBOARD_REFRESH_SECS is not a number; using {}",
                    DEFAULT_REFRESH_SECS
                );
                DEFAULT_REFRESH_SECS
            }
        };
        let refresh_interval = (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs));

        Self {
            api_url,
            api_key,
            vs_currency,
            per_page,
            data_dir,
            store,
            refresh_interval,
        }
    }
}
