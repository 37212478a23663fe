use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use super::{FavoriteEntry, FavoritesStoreTrait};
use crate::constants::FAVORITES_STORAGE_KEY;
use crate::errors::{PersistenceError, Result};
use crate::storage::KeyValueStore;

/// Favorites kept as a JSON array in a single key-value slot.
///
/// Every save rewrites the whole array; there is no merging with what is
/// already stored.
pub struct KeyValueFavoritesStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueFavoritesStore {
    /// Store under the standard `"favorites"` slot.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, FAVORITES_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        KeyValueFavoritesStore {
            store,
            key: key.to_string(),
        }
    }
}

impl FavoritesStoreTrait for KeyValueFavoritesStore {
    fn load(&self) -> Vec<FavoriteEntry> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read favorites, starting empty: {}", e);
                return Vec::new();
            }
        };

        match decode_favorites(&raw) {
            Ok(entries) => {
                debug!("Loaded {} favorites from '{}'", entries.len(), self.key);
                entries
            }
            Err(e) => {
                warn!("Ignoring stored favorites: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[FavoriteEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(&self.key, &json)
    }
}

/// Decode the stored array.
///
/// The slot must hold a JSON array. Elements without a string `id` are
/// skipped, fields other than `id`, `name` and `symbol` are ignored, and a
/// repeated `id` keeps its first occurrence.
fn decode_favorites(raw: &str) -> std::result::Result<Vec<FavoriteEntry>, PersistenceError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| PersistenceError::Corrupted(e.to_string()))?;
    let items = value
        .as_array()
        .ok_or_else(|| PersistenceError::Corrupted("expected a JSON array".to_string()))?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let Some(id) = item.get("id").and_then(Value::as_str) else {
            warn!("Skipping stored favorite without an id");
            continue;
        };
        if !seen.insert(id.to_string()) {
            continue;
        }
        entries.push(FavoriteEntry {
            id: id.to_string(),
            name: item.get("name").and_then(Value::as_str).map(str::to_string),
            symbol: item.get("symbol").and_then(Value::as_str).map(str::to_string),
        });
    }

    Ok(entries)
}
