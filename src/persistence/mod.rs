//! Key-value persistence
//!
//! Features:
//! - `KeyValueStore` trait over LocalStorage (web) and memory (tests/native)
//! - JSON records read and written as whole objects under fixed keys
//! - Missing or corrupt records load as defaults

#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;
pub mod progress;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use progress::{PROGRESS_KEY, Progress, ProgressPatch};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// String key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Read a JSON record; `None` when absent or unreadable
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let json = match store.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::error!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt {}: {}", key, e);
            None
        }
    }
}

/// Write a JSON record, replacing what was stored
pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_roundtrip_and_corruption() {
        let mut store = MemoryStore::new();
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1u32);
        save_json(&mut store, "k", &map).unwrap();
        assert_eq!(load_json::<BTreeMap<String, u32>>(&store, "k"), Some(map));

        store.set("k", "{not json").unwrap();
        assert_eq!(load_json::<BTreeMap<String, u32>>(&store, "k"), None);
        assert_eq!(load_json::<BTreeMap<String, u32>>(&store, "missing"), None);
    }

    #[test]
    fn test_unavailable_store_loads_nothing() {
        let store = MemoryStore::unavailable();
        assert_eq!(load_json::<u32>(&store, "k"), None);
    }
}
