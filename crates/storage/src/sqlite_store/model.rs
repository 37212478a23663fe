//! Database model for key-value rows.

use diesel::prelude::*;

/// One row of the `app_settings` table.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
pub struct AppSettingDB {
    pub setting_key: String,
    pub setting_value: String,
}
