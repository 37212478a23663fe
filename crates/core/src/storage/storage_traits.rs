use crate::errors::Result;

/// A local, durable key-value slot store.
///
/// Values are opaque strings; callers decide on the encoding. Writes replace
/// the whole value stored under a key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing anything already there.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Clear the slot. Removing an empty slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
