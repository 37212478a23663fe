//! Key-value storage abstraction for locally persisted client state.

mod memory_store;
mod storage_traits;

pub use memory_store::InMemoryKeyValueStore;
pub use storage_traits::KeyValueStore;
