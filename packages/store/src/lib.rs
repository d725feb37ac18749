//! # Storage layer for the Tarifhane recipe catalog
//!
//! All persistent state is three JSON collections behind a [`KeyValueStore`]:
//!
//! | Key | Contents | Owner |
//! |-----|----------|-------|
//! | `users` | [`User`] records | account flows (`tarifhane-api`) |
//! | `recipes` | [`Recipe`] records | [`RecipeRepository`] |
//! | `favorites` | [`FavoriteLink`] records | [`FavoritesIndex`] |
//!
//! A read-only set of sample recipes is compiled in (see [`samples`]).
//!
//! Backends: [`MemoryStore`] everywhere, [`FileStore`] on native targets, and
//! `LocalStorageStore` on wasm32 with the `web` feature.

pub mod config;
pub mod error;
pub mod favorites;
pub mod kv;
pub mod models;
pub mod recipes;
pub mod samples;
pub mod search;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod web_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use web_storage::LocalStorageStore;

pub use config::CatalogConfig;
pub use error::{RecipeError, StoreError};
pub use favorites::{FavoritesIndex, Toggle};
pub use kv::KeyValueStore;
pub use models::{Category, Difficulty, FavoriteLink, Owner, Recipe, RecipeDraft, User};
pub use recipes::RecipeRepository;
pub use samples::sample_recipes;
pub use search::{CategoryFilter, RecipeQuery, SearchScope};
