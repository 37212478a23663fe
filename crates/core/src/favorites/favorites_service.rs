use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, error, info};

use super::{FavoriteEntry, FavoriteLookup, FavoritesServiceTrait, FavoritesStoreTrait};
use crate::assets::DisplayAsset;

/// In-memory favorite set: insertion-ordered entries plus an id index.
#[derive(Debug, Default)]
struct FavoriteSet {
    entries: Vec<FavoriteEntry>,
    ids: HashSet<String>,
}

impl FavoriteSet {
    fn from_entries(entries: Vec<FavoriteEntry>) -> Self {
        let mut set = FavoriteSet::default();
        for entry in entries {
            set.insert(entry);
        }
        set
    }

    fn contains(&self, asset_id: &str) -> bool {
        self.ids.contains(asset_id)
    }

    fn insert(&mut self, entry: FavoriteEntry) -> bool {
        if !self.ids.insert(entry.id.clone()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    fn remove(&mut self, asset_id: &str) -> bool {
        if !self.ids.remove(asset_id) {
            return false;
        }
        self.entries.retain(|entry| entry.id != asset_id);
        true
    }
}

/// Owner of the favorite set and the only writer to its store.
pub struct FavoritesService {
    store: Arc<dyn FavoritesStoreTrait>,
    favorites: RwLock<FavoriteSet>,
}

impl FavoritesService {
    /// Build the service, seeding the set from `store.load()`.
    pub fn new(store: Arc<dyn FavoritesStoreTrait>) -> Self {
        let favorites = FavoriteSet::from_entries(store.load());
        info!("Favorites initialized with {} entries", favorites.entries.len());
        FavoritesService {
            store,
            favorites: RwLock::new(favorites),
        }
    }
}

impl FavoriteLookup for FavoritesService {
    fn is_favorite(&self, asset_id: &str) -> bool {
        self.favorites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(asset_id)
    }
}

impl FavoritesServiceTrait for FavoritesService {
    fn toggle(&self, asset: &DisplayAsset) -> bool {
        // Held until the save returns so nobody reads a half-applied toggle.
        let mut favorites = self
            .favorites
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let now_favorite = if favorites.remove(&asset.id) {
            false
        } else {
            favorites.insert(FavoriteEntry::from(asset));
            true
        };
        debug!(
            "Toggled {} -> {}",
            asset.id,
            if now_favorite { "favorite" } else { "not favorite" }
        );

        if let Err(e) = self.store.save(&favorites.entries) {
            error!(
                "Failed to persist favorites after toggling {}: {}. Keeping the change in memory.",
                asset.id, e
            );
        }

        now_favorite
    }

    fn favorites(&self) -> Vec<FavoriteEntry> {
        self.favorites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clone()
    }

    fn favorite_ids(&self) -> HashSet<String> {
        self.favorites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ids
            .clone()
    }
}
