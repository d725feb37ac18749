//! # Key-value storage abstraction
//!
//! Everything the catalog persists goes through [`KeyValueStore`]: a synchronous
//! string-to-string map with the same shape as the browser's `localStorage`.
//! Implementations live in sibling modules ([`crate::MemoryStore`],
//! [`crate::FileStore`], and `LocalStorageStore` on the web).
//!
//! Collections are stored as one JSON array per key. [`load_collection`] and
//! [`save_collection`] read and rewrite the whole array; there is no partial
//! update, so the last writer wins.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Key holding the `users` collection.
pub const USERS_KEY: &str = "users";
/// Key holding the `recipes` collection.
pub const RECIPES_KEY: &str = "recipes";
/// Key holding the `favorites` collection.
pub const FAVORITES_KEY: &str = "favorites";
/// Key holding the logged-in user between reloads.
pub const SESSION_KEY: &str = "currentUser";

/// Synchronous string storage keyed by name.
///
/// Methods take `&self`; backends use interior mutability so a cloned handle can
/// be shared by several repositories and observe the same data.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Read the JSON array stored under `key`. A missing key is an empty collection.
pub fn load_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
        key: key.to_string(),
        source,
    })
}

/// Replace the JSON array stored under `key` with `items`.
pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Read a single JSON value stored under `key`.
pub fn load_value<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Store a single JSON value under `key`.
pub fn save_value<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
