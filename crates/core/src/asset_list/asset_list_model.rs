//! Asset list state models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assets::DisplayAsset;

/// Whether the list has ever been filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadState {
    /// No fetch has succeeded yet.
    Loading,
    /// At least one fetch has succeeded.
    Ready,
}

/// The last refresh that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshFailure {
    pub message: String,
    pub retryable: bool,
    pub failed_at: DateTime<Utc>,
}

/// What the presentation layer shows above the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ListStatus {
    Loading,
    Ready,
    /// The latest refresh failed. `has_data` tells whether older rows are
    /// still on screen.
    #[serde(rename_all = "camelCase")]
    Error {
        message: String,
        retryable: bool,
        has_data: bool,
    },
}

/// Rows whose name contains `filter`, ignoring case, in their original order.
///
/// An empty filter keeps everything.
pub fn filter_assets(assets: &[DisplayAsset], filter: &str) -> Vec<DisplayAsset> {
    if filter.is_empty() {
        return assets.to_vec();
    }

    let needle = filter.to_lowercase();
    assets
        .iter()
        .filter(|asset| asset.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
