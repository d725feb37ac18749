//! # Browser `localStorage` store: web persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] implementation used on the **web
//! platform**. It reads and writes `window.localStorage` through [`web_sys::Storage`],
//! which is synchronous and string-valued, so every collection is a single JSON
//! string per key.
//!
//! ## Keys
//!
//! | Namespace | `users` is stored as |
//! |-----------|----------------------|
//! | `None` | `"users"` |
//! | `Some("demo")` | `"demo:users"` |
//!
//! The unscoped form keeps the key layout other copies of the app already wrote.
//!
//! ## Connection management
//!
//! The store holds only its namespace and looks up `window.localStorage` on every
//! call. Browsers that disable storage (private mode, sandboxed iframes) surface
//! as [`StoreError::Backend`] rather than a panic.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    namespace: Option<String>,
}

impl LocalStorageStore {
    /// Unscoped store using bare key names.
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// Store whose keys are prefixed with `"<namespace>:"`.
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
        }
    }

    fn scoped_key(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{key}"),
            None => key.to_string(),
        }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Backend("no window".to_string()))?;
        window
            .local_storage()
            .map_err(backend_error)?
            .ok_or_else(|| StoreError::Backend("localStorage unavailable".to_string()))
    }
}

fn backend_error(err: JsValue) -> StoreError {
    StoreError::Backend(format!("{err:?}"))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(&self.scoped_key(key))
            .map_err(backend_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(&self.scoped_key(key), value)
            .map_err(backend_error)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(&self.scoped_key(key))
            .map_err(backend_error)
    }
}
