mod model;
mod store;

pub use model::AppSettingDB;
pub use store::SqliteKeyValueStore;
