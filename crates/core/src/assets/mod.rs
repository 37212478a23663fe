//! Assets module - display model and normalization of raw market records.

mod assets_model;
mod assets_normalizer;

pub use assets_model::DisplayAsset;
pub use assets_normalizer::{apply_favorite_flags, normalize, normalize_record};
