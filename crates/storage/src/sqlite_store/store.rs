use diesel::prelude::*;
use log::debug;
use std::path::Path;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{self, get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use coinboard_core::errors::Result;
use coinboard_core::storage::KeyValueStore;

/// Key-value store backed by the `app_settings` table.
pub struct SqliteKeyValueStore {
    pool: Arc<DbPool>,
}

impl SqliteKeyValueStore {
    pub fn new(pool: Arc<DbPool>) -> Self {
        SqliteKeyValueStore { pool }
    }

    /// Open (or create) `coinboard.db` under `data_dir` and bring the schema
    /// up to date.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let db_path = db::init(data_dir)?;
        let pool = db::create_pool(&db_path)?;
        db::run_migrations(&pool)?;
        debug!("Opened SQLite store at {}", db_path);
        Ok(Self::new(pool))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = app_settings
            .filter(setting_key.eq(key))
            .select(setting_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::replace_into(app_settings)
            .values(&AppSettingDB {
                setting_key: key.to_string(),
                setting_value: value.to_string(),
            })
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::delete(app_settings.filter(setting_key.eq(key)))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }
}
