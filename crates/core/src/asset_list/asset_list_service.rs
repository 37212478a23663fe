use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use coinboard_market_data::MarketDataSource;

use super::{filter_assets, ListStatus, LoadState, RefreshFailure};
use crate::assets::{apply_favorite_flags, normalize, DisplayAsset};
use crate::errors::{Error, Result};
use crate::favorites::FavoritesServiceTrait;

#[derive(Debug)]
struct ListState {
    load_state: LoadState,
    assets: Vec<DisplayAsset>,
    last_refreshed_at: Option<DateTime<Utc>>,
    last_error: Option<RefreshFailure>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            load_state: LoadState::Loading,
            assets: Vec::new(),
            last_refreshed_at: None,
            last_error: None,
        }
    }
}

/// Holds the fetched asset list and the filter text, and turns them into the
/// rows the presentation layer draws.
///
/// Favorites are read from, and toggles delegated to, the favorites service.
/// This type never writes favorites itself.
///
/// No lock is held while a fetch is in flight, so filter and favorite changes
/// made during a refresh land on whatever list is current, and the filter
/// text survives the refresh. A refresh that finishes after a newer one still
/// replaces the list (last write wins).
pub struct AssetListViewModel {
    source: Arc<dyn MarketDataSource>,
    favorites: Arc<dyn FavoritesServiceTrait>,
    state: RwLock<ListState>,
    filter: RwLock<String>,
}

impl AssetListViewModel {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        favorites: Arc<dyn FavoritesServiceTrait>,
    ) -> Self {
        AssetListViewModel {
            source,
            favorites,
            state: RwLock::new(ListState::default()),
            filter: RwLock::new(String::new()),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ListState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ListState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-fetch from the source and rebuild the rows.
    ///
    /// On success returns the number of rows now held. On failure the held
    /// rows and load state are left alone, the failure is recorded for
    /// [`status`](Self::status), and `Error::DataFetch` is returned.
    pub async fn refresh(&self) -> Result<usize> {
        debug!("Refreshing asset list from {}", self.source.id());

        match self.source.get_assets().await {
            Ok(records) => {
                let mut state = self.write_state();
                // Normalize under the lock so a concurrent toggle can't slip
                // between flag derivation and the swap.
                state.assets = normalize(records, &*self.favorites);
                state.load_state = LoadState::Ready;
                state.last_refreshed_at = Some(Utc::now());
                state.last_error = None;

                info!(
                    "Asset list refreshed from {}: {} assets",
                    self.source.id(),
                    state.assets.len()
                );
                Ok(state.assets.len())
            }
            Err(e) => {
                let retryable = e.is_retryable();
                warn!(
                    "Asset list refresh from {} failed (retryable: {}): {}",
                    self.source.id(),
                    retryable,
                    e
                );

                let mut state = self.write_state();
                state.last_error = Some(RefreshFailure {
                    message: e.to_string(),
                    retryable,
                    failed_at: Utc::now(),
                });
                Err(Error::DataFetch(e))
            }
        }
    }

    /// Replace the filter text. No fetch happens.
    pub fn set_filter(&self, text: impl Into<String>) {
        let text = text.into();
        debug!("Filter set to {:?}", text);
        *self.filter.write().unwrap_or_else(PoisonError::into_inner) = text;
    }

    /// Flip the favorite status of a held asset and refresh every row's flag
    /// in place. Returns the new status.
    pub fn toggle_favorite(&self, asset_id: &str) -> Result<bool> {
        let mut state = self.write_state();

        let asset = state
            .assets
            .iter()
            .find(|asset| asset.id == asset_id)
            .cloned()
            .ok_or_else(|| Error::AssetNotFound(asset_id.to_string()))?;

        let is_favorite = self.favorites.toggle(&asset);
        apply_favorite_flags(&mut state.assets, &*self.favorites);

        Ok(is_favorite)
    }

    /// Held rows matching the current filter, in source order.
    pub fn visible_assets(&self) -> Vec<DisplayAsset> {
        let filter = self.filter();
        filter_assets(&self.read_state().assets, &filter)
    }

    /// All held rows, ignoring the filter.
    pub fn assets(&self) -> Vec<DisplayAsset> {
        self.read_state().assets.clone()
    }

    pub fn filter(&self) -> String {
        self.filter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.read_state().load_state
    }

    /// Loading / Ready, or Error while the most recent refresh has failed.
    pub fn status(&self) -> ListStatus {
        let state = self.read_state();
        match (&state.last_error, state.load_state) {
            (Some(failure), load_state) => ListStatus::Error {
                message: failure.message.clone(),
                retryable: failure.retryable,
                has_data: load_state == LoadState::Ready,
            },
            (None, LoadState::Loading) => ListStatus::Loading,
            (None, LoadState::Ready) => ListStatus::Ready,
        }
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.read_state().last_refreshed_at
    }

    pub fn last_error(&self) -> Option<RefreshFailure> {
        self.read_state().last_error.clone()
    }

    /// The favorites service this list reads from.
    pub fn favorites(&self) -> &Arc<dyn FavoritesServiceTrait> {
        &self.favorites
    }
}
