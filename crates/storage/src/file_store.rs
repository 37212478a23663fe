use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use coinboard_core::{errors::Result, storage::KeyValueStore};

const CURRENT_VERSION: u32 = 1;

/// File name of the JSON store inside the data directory.
pub const STORE_FILE_NAME: &str = "coinboard.json";

/// Key-value store kept in a single JSON document:
///
/// ```json
/// { "version": 1, "entries": { "favorites": "[...]" } }
/// ```
///
/// Every operation reads the file, and writes replace it whole. The mutex
/// serializes access from this process only.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize, Default)]
struct StoreDocument {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Store at `<data_dir>/coinboard.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_entries<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = match self.load_entries_locked() {
            Ok(entries) => entries,
            Err(StorageError::Corrupted(msg)) => {
                warn!(
                    "Overwriting corrupted store file {}: {}",
                    self.path.display(),
                    msg
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        op(&mut entries);
        self.persist_entries_locked(entries)?;
        Ok(())
    }

    fn load_entries_locked(&self) -> std::result::Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read(&self.path)?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        let document: StoreDocument =
            serde_json::from_slice(&raw).map_err(|e| StorageError::Corrupted(e.to_string()))?;
        Ok(document.entries)
    }

    fn persist_entries_locked(
        &self,
        entries: BTreeMap<String, String>,
    ) -> std::result::Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let document = StoreDocument {
            version: CURRENT_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load_entries_locked()?;
        Ok(entries.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}
