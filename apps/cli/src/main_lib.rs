use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use coinboard_core::favorites::{FavoritesService, FavoritesServiceTrait, KeyValueFavoritesStore};
use coinboard_core::storage::KeyValueStore;
use coinboard_core::AssetListViewModel;
use coinboard_market_data::{CoinGeckoProvider, MarketDataSource};
use coinboard_storage::{FileKeyValueStore, SqliteKeyValueStore};

use crate::config::{Config, StoreKind};

/// Install the global subscriber. Output goes to stderr so it stays out of
/// the rendered table; `log` records from the library crates are bridged in.
pub fn init_tracing() {
    let log_format = std::env::var("COINBOARD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_key_value_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.store {
        StoreKind::File => {
            let store = FileKeyValueStore::in_dir(&config.data_dir);
            tracing::info!("Favorites file in use: {}", store.path().display());
            Arc::new(store)
        }
        StoreKind::Sqlite => {
            tracing::info!("Favorites database in use under {}", config.data_dir.display());
            Arc::new(SqliteKeyValueStore::open(&config.data_dir)?)
        }
    };
    Ok(store)
}

pub fn build_market_data_source(config: &Config) -> Arc<dyn MarketDataSource> {
    let mut provider = CoinGeckoProvider::new()
        .with_base_url(config.api_url.as_str())
        .with_vs_currency(config.vs_currency.as_str())
        .with_per_page(config.per_page);
    if let Some(key) = &config.api_key {
        provider = provider.with_api_key(key.as_str());
    }
    Arc::new(provider)
}

pub fn build_view_model(config: &Config) -> anyhow::Result<Arc<AssetListViewModel>> {
    let kv = build_key_value_store(config)?;
    let favorites: Arc<dyn FavoritesServiceTrait> =
        Arc::new(FavoritesService::new(Arc::new(KeyValueFavoritesStore::new(kv))));
    let source = build_market_data_source(config);

    Ok(Arc::new(AssetListViewModel::new(source, favorites)))
}
