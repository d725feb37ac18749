//! # API crate: account, session and catalog operations for Tarifhane
//!
//! Everything the pages call lives here, on top of the storage layer in
//! `tarifhane-store`.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Credential hashing ([`CredentialHasher`]), the [`Session`] context object, and the [`Accounts`] flows (register, login, logout, change password) |
//! | [`catalog`] | [`Catalog`], the session-gated recipe and favorite operations |
//! | [`validation`] | Form checks with per-field messages |
//! | [`models`] | [`UserInfo`], the credential-free view of a user |
//! | [`error`] | [`AuthError`] and [`CatalogError`] |
//!
//! ## Storage
//!
//! [`make_store`] picks the platform backend:
//! - **Web** (wasm32 + `web` feature): `window.localStorage`
//! - **Desktop / terminal** (native): one JSON file per key under the platform data dir
//! - anything else: an in-memory store

pub mod auth;
pub mod catalog;
pub mod error;
pub mod models;
pub mod validation;

pub use auth::{Accounts, Argon2Hasher, CredentialHasher, PlaintextHasher, Session};
pub use catalog::Catalog;
pub use error::{AuthError, CatalogError};
pub use models::UserInfo;
pub use validation::{ChangePasswordForm, LoginForm, RegisterForm, ValidationErrors};

pub use tarifhane_store::CatalogConfig;

/// Create the platform-appropriate store, scoped by `config.storage.namespace`.
pub fn make_store(config: &CatalogConfig) -> impl tarifhane_store::KeyValueStore + Clone {
    let namespace = config.storage.namespace.as_deref();
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        tarifhane_store::LocalStorageStore::with_namespace(namespace)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tarifhane_store::FileStore::new(tarifhane_store::FileStore::default_location(namespace))
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        let _ = namespace;
        tarifhane_store::MemoryStore::new()
    }
}

/// Catalog over the platform store with Argon2 credentials.
pub fn open_catalog(
    config: CatalogConfig,
) -> Catalog<impl tarifhane_store::KeyValueStore + Clone, Argon2Hasher> {
    let store = make_store(&config);
    Catalog::new(store, Argon2Hasher, config)
}
