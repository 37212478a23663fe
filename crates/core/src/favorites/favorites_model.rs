//! Favorites domain models.

use serde::{Deserialize, Serialize};

use crate::assets::DisplayAsset;

/// A stored favorite.
///
/// Only `id` takes part in membership; `name` and `symbol` are a snapshot
/// from the moment the asset was starred, kept so the stored list is
/// readable on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl FavoriteEntry {
    /// Identifier-only entry.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            symbol: None,
        }
    }
}

impl From<&DisplayAsset> for FavoriteEntry {
    fn from(asset: &DisplayAsset) -> Self {
        Self {
            id: asset.id.clone(),
            name: Some(asset.name.clone()),
            symbol: asset.symbol.clone(),
        }
    }
}
