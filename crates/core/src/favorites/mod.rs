//! Favorites module - the user's starred assets and their local persistence.

mod favorites_model;
mod favorites_service;
mod favorites_store;
mod favorites_traits;


pub use favorites_model::FavoriteEntry;
pub use favorites_service::FavoritesService;
pub use favorites_store::KeyValueFavoritesStore;
pub use favorites_traits::{FavoriteLookup, FavoritesServiceTrait, FavoritesStoreTrait};
