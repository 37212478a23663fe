//! Asset list module - the view model behind the asset table.

mod asset_list_model;
mod asset_list_service;

#[cfg(test)]
mod asset_list_service_tests;

pub use asset_list_model::{filter_assets, ListStatus, LoadState, RefreshFailure};
pub use asset_list_service::AssetListViewModel;
