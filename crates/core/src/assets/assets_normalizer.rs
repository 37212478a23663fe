//! Raw market record -> display model mapping.

use coinboard_market_data::RawAssetRecord;

use super::DisplayAsset;
use crate::favorites::FavoriteLookup;

/// Map one raw record, tagging it with its current favorite status.
pub fn normalize_record<L>(record: RawAssetRecord, favorites: &L) -> DisplayAsset
where
    L: FavoriteLookup + ?Sized,
{
    let is_favorite = favorites.is_favorite(&record.id);
    DisplayAsset {
        id: record.id,
        symbol: record.symbol,
        name: record.name,
        price: record.price,
        change_1h: record.change_1h,
        change_24h: record.change_24h,
        change_7d: record.change_7d,
        is_favorite,
    }
}

/// Map a fetched list into display rows, keeping the source order.
pub fn normalize<I, L>(records: I, favorites: &L) -> Vec<DisplayAsset>
where
    I: IntoIterator<Item = RawAssetRecord>,
    L: FavoriteLookup + ?Sized,
{
    records
        .into_iter()
        .map(|record| normalize_record(record, favorites))
        .collect()
}

/// Re-derive only the favorite flags of already normalized rows.
///
/// Prices and changes are left exactly as they are.
pub fn apply_favorite_flags<L>(assets: &mut [DisplayAsset], favorites: &L)
where
    L: FavoriteLookup + ?Sized,
{
    for asset in assets.iter_mut() {
        asset.is_favorite = favorites.is_favorite(&asset.id);
    }
}
