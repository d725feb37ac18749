//! # Recipe repository: CRUD over the `recipes` collection
//!
//! [`RecipeRepository`] wraps a [`KeyValueStore`] and treats the `recipes` key as
//! the single source of truth. Every call re-reads the whole collection, and
//! every mutation rewrites it, so a read after a write in the same process always
//! sees the write. Listings come back in storage (insertion) order.
//!
//! ## Ownership
//!
//! A recipe's `user_id` is fixed at creation. [`update`](RecipeRepository::update)
//! refuses a replacement that names another owner, and
//! [`delete`](RecipeRepository::delete) refuses a caller who is not the owner.

use tracing::{debug, info, warn};

use crate::config::RecipesConfig;
use crate::error::{RecipeError, StoreError};
use crate::kv::{load_collection, save_collection, KeyValueStore, RECIPES_KEY};
use crate::models::{next_id, Owner, Recipe, RecipeDraft, UNKNOWN_USERNAME};

/// Recipe CRUD on top of a key-value store.
#[derive(Clone, Debug)]
pub struct RecipeRepository<S: KeyValueStore> {
    store: S,
    config: RecipesConfig,
}

impl<S: KeyValueStore> RecipeRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, RecipesConfig::default())
    }

    pub fn with_config(store: S, config: RecipesConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> Result<Vec<Recipe>, RecipeError> {
        Ok(load_collection(&self.store, RECIPES_KEY)?)
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), RecipeError> {
        Ok(save_collection(&self.store, RECIPES_KEY, recipes)?)
    }

    /// Store a new recipe owned by `owner` and return it.
    ///
    /// An empty image falls back to the configured placeholder; a draft with no
    /// category goes to the community category.
    pub fn create(&self, draft: RecipeDraft, owner: Owner<'_>) -> Result<Recipe, RecipeError> {
        let mut recipes = self.load()?;
        let id = next_id(recipes.iter().map(|r| r.id).max()).ok_or_else(|| {
            StoreError::IdsExhausted {
                key: RECIPES_KEY.to_string(),
            }
        })?;

        let image = draft
            .image
            .filter(|img| !img.is_empty())
            .unwrap_or_else(|| self.config.default_image.clone());
        let category = draft
            .category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.config.community_category.clone());
        let username = if owner.username.is_empty() {
            UNKNOWN_USERNAME.to_string()
        } else {
            owner.username.to_string()
        };

        let recipe = Recipe {
            id,
            title: draft.title,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            cooking_time: draft.cooking_time,
            difficulty: draft.difficulty,
            image,
            user_id: owner.id.to_string(),
            username,
            category,
        };
        recipes.push(recipe.clone());
        self.save(&recipes)?;

        info!(id, user_id = owner.id, category = %recipe.category, "recipe created");
        Ok(recipe)
    }

    /// Every recipe in storage order.
    pub fn list_all(&self) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.load()?;
        debug!(count = recipes.len(), "listed recipes");
        Ok(recipes)
    }

    pub fn list_by_owner(&self, user_id: &str) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.is_owned_by(user_id))
            .collect())
    }

    /// Recipes filed under exactly `category`.
    pub fn list_by_category(&self, category: &str) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.category == category)
            .collect())
    }

    /// Community submissions ("Sizden Gelenler").
    pub fn list_community(&self) -> Result<Vec<Recipe>, RecipeError> {
        self.list_by_category(&self.config.community_category)
    }

    pub fn get(&self, id: i64) -> Result<Option<Recipe>, RecipeError> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Replace the stored record with the same id.
    ///
    /// Returns `Ok(None)` without writing when no such record exists.
    pub fn update(&self, recipe: Recipe) -> Result<Option<Recipe>, RecipeError> {
        let mut recipes = self.load()?;
        let Some(slot) = recipes.iter_mut().find(|r| r.id == recipe.id) else {
            debug!(id = recipe.id, "update of unknown recipe ignored");
            return Ok(None);
        };
        if slot.user_id != recipe.user_id {
            warn!(id = recipe.id, "update would change recipe owner");
            return Err(RecipeError::NotOwner {
                id: recipe.id,
                user_id: recipe.user_id,
            });
        }
        *slot = recipe.clone();
        self.save(&recipes)?;

        info!(id = recipe.id, "recipe updated");
        Ok(Some(recipe))
    }

    /// Remove a recipe owned by `user_id`. Returns whether a record was removed.
    pub fn delete(&self, id: i64, user_id: &str) -> Result<bool, RecipeError> {
        let mut recipes = self.load()?;
        let Some(pos) = recipes.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        if !recipes[pos].is_owned_by(user_id) {
            warn!(id, user_id, "delete refused for non-owner");
            return Err(RecipeError::NotOwner {
                id,
                user_id: user_id.to_string(),
            });
        }
        recipes.remove(pos);
        self.save(&recipes)?;

        info!(id, user_id, "recipe deleted");
        Ok(true)
    }
}
