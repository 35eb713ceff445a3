//! Key-value store wrapper with automatic serialization.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe snapshot store backed by Spin's Key-Value Store.
///
/// Values are serialized as JSON. A value that is missing — or that no longer
/// deserializes into the requested type — reads back as `None`; startup paths
/// degrade to defaults instead of failing on a stale snapshot.
pub struct Store {
    #[cfg(target_arch = "wasm32")]
    store: spin_sdk::key_value::Store,
    #[cfg(not(target_arch = "wasm32"))]
    entries: std::sync::Mutex<std::collections::HashMap<String, Vec<u8>>>,
}

impl Store {
    /// Open the default Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, StoreError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StoreError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    #[cfg(target_arch = "wasm32")]
    pub fn open(name: &str) -> Result<Self, StoreError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StoreError::OpenError(e.to_string()))?;
        Ok(Self { store })
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist or the stored bytes do not
    /// deserialize into `T`.
    #[cfg(target_arch = "wasm32")]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key) {
            Ok(Some(bytes)) => Ok(serde_json::from_slice(&bytes).ok()),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::BackendError(e.to_string())),
        }
    }

    /// Set a value in the store.
    #[cfg(target_arch = "wasm32")]
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.store
            .set(key, &bytes)
            .map_err(|e| StoreError::BackendError(e.to_string()))
    }

    /// Delete a value from the store.
    #[cfg(target_arch = "wasm32")]
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store
            .delete(key)
            .map_err(|e| StoreError::BackendError(e.to_string()))
    }

    /// Check if a key exists in the store.
    #[cfg(target_arch = "wasm32")]
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.store
            .exists(key)
            .map_err(|e| StoreError::BackendError(e.to_string()))
    }

    // Native targets use an in-memory map so snapshot round-trips work in
    // development and tests.

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self {
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(_name: &str) -> Result<Self, StoreError> {
        Self::open_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::BackendError(e.to_string()))?;
        Ok(entries
            .get(key)
            .and_then(|bytes| serde_json::from_slice(bytes).ok()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::BackendError(e.to_string()))?;
        entries.insert(key.to_string(), bytes);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::BackendError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::BackendError(e.to_string()))?;
        Ok(entries.contains_key(key))
    }

    /// Store raw bytes under a key. Exists so tests can plant snapshots that
    /// do not deserialize into the expected type.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn set_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::BackendError(e.to_string()))?;
        entries.insert(key.to_string(), bytes);
        Ok(())
    }
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = store_key!("session", user_id);
/// // Returns "session:user123"
/// ```
#[macro_export]
macro_rules! store_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        name: String,
        total: i64,
    }

    #[test]
    fn test_round_trip() {
        let store = Store::open_default().unwrap();
        let snapshot = Snapshot {
            name: "Parent User".to_string(),
            total: 6000,
        };

        store.set("purchase:last", &snapshot).unwrap();
        let loaded: Option<Snapshot> = store.get("purchase:last").unwrap();
        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn test_missing_key_reads_none() {
        let store = Store::open_default().unwrap();
        let loaded: Option<Snapshot> = store.get("purchase:last").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_value_reads_none() {
        let store = Store::open_default().unwrap();
        store.set_raw("purchase:last", b"{not json".to_vec()).unwrap();

        let loaded: Option<Snapshot> = store.get("purchase:last").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_delete_and_exists() {
        let store = Store::open_default().unwrap();
        store.set("session:current", &1i64).unwrap();
        assert!(store.exists("session:current").unwrap());

        store.delete("session:current").unwrap();
        assert!(!store.exists("session:current").unwrap());
    }

    #[test]
    fn test_store_key_macro() {
        let key = store_key!("session", "user123");
        assert_eq!(key, "session:user123");

        let key = store_key!("purchase", 42, "last");
        assert_eq!(key, "purchase:42:last");
    }
}
