use std::collections::HashSet;

use super::FavoriteEntry;
use crate::assets::DisplayAsset;
use crate::errors::Result;

/// Membership test against the current favorite set.
pub trait FavoriteLookup {
    fn is_favorite(&self, asset_id: &str) -> bool;
}

impl FavoriteLookup for HashSet<String> {
    fn is_favorite(&self, asset_id: &str) -> bool {
        self.contains(asset_id)
    }
}

/// Durable storage of the favorite set.
pub trait FavoritesStoreTrait: Send + Sync {
    /// Read the stored favorites.
    ///
    /// Never fails: an absent, unreadable or malformed slot reads as empty.
    fn load(&self) -> Vec<FavoriteEntry>;

    /// Replace the stored favorites with `entries`.
    fn save(&self, entries: &[FavoriteEntry]) -> Result<()>;
}

/// Trait for favorites service operations
pub trait FavoritesServiceTrait: FavoriteLookup + Send + Sync {
    /// Flip the favorite status of `asset` and write the whole set through to
    /// storage. Returns the new status.
    ///
    /// A failed write is logged, not returned: the in-memory set stays
    /// toggled.
    fn toggle(&self, asset: &DisplayAsset) -> bool;

    /// Current favorites in the order they were added.
    fn favorites(&self) -> Vec<FavoriteEntry>;

    /// Snapshot of the current favorite identifiers.
    fn favorite_ids(&self) -> HashSet<String>;
}
