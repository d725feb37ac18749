//! # Favorites index: per-user favorite flags over the `favorites` collection
//!
//! The `favorites` key holds a flat array of [`FavoriteLink`]s. A user's view is
//! the subset whose `user_id` matches; membership is keyed by
//! `(user_id, recipe.id)` and there is at most one link per pair.
//!
//! Each link embeds the recipe as it was when favorited. Later edits to the
//! recipe are not propagated, so [`list_for_user`](FavoritesIndex::list_for_user)
//! returns those snapshots as stored.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::kv::{load_collection, save_collection, KeyValueStore, FAVORITES_KEY};
use crate::models::{FavoriteLink, Recipe};

/// Outcome of [`FavoritesIndex::toggle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toggle {
    /// `true` when the recipe became a favorite, `false` when it was removed.
    pub added: bool,
}

/// Favorite flags on top of a key-value store.
#[derive(Clone, Debug)]
pub struct FavoritesIndex<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FavoritesIndex<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<FavoriteLink>, StoreError> {
        load_collection(&self.store, FAVORITES_KEY)
    }

    pub fn is_favorite(&self, user_id: &str, recipe_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .load()?
            .iter()
            .any(|fav| fav.user_id == user_id && fav.recipe.id == recipe_id))
    }

    /// Flip the favorite flag for `(user_id, recipe.id)`.
    ///
    /// Adding stores a snapshot of `recipe`; removing drops the existing link.
    pub fn toggle(&self, user_id: &str, recipe: &Recipe) -> Result<Toggle, StoreError> {
        let mut links = self.load()?;
        let before = links.len();
        links.retain(|fav| !(fav.user_id == user_id && fav.recipe.id == recipe.id));

        let added = links.len() == before;
        if added {
            links.push(FavoriteLink {
                user_id: user_id.to_string(),
                recipe: recipe.clone(),
            });
        }
        save_collection(&self.store, FAVORITES_KEY, &links)?;

        info!(user_id, recipe_id = recipe.id, added, "favorite toggled");
        Ok(Toggle { added })
    }

    /// Recipe snapshots the user has favorited, in the order they were added.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let recipes: Vec<Recipe> = self
            .load()?
            .into_iter()
            .filter(|fav| fav.user_id == user_id)
            .map(|fav| fav.recipe)
            .collect();
        debug!(user_id, count = recipes.len(), "listed favorites");
        Ok(recipes)
    }

    /// Ids of the user's favorites, for quick membership checks while rendering.
    pub fn favorite_ids(&self, user_id: &str) -> Result<BTreeSet<i64>, StoreError> {
        Ok(self
            .load()?
            .iter()
            .filter(|fav| fav.user_id == user_id)
            .map(|fav| fav.recipe.id)
            .collect())
    }
}
