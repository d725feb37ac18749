//! # Catalog: session-gated operations for the presentation layer
//!
//! [`Catalog`] bundles the account flows, the recipe repository and the favorites
//! index over one shared store, and applies the login policy the pages expect:
//!
//! | Operation | Without a session |
//! |-----------|-------------------|
//! | browsing (`recipes`, `community`, `by_category`, `search`) | allowed |
//! | `submit_recipe`, `my_recipes`, `edit_recipe`, `delete_recipe`, `toggle_favorite` | [`CatalogError::NotAuthenticated`] |
//! | `is_favorite` | `false` |
//! | `favorites`, `favorite_ids` | empty |
//!
//! Edits and deletes are also checked against the recipe's owner here, on top
//! of the repository's own check.
//!
//! Unless `recipes.include_samples` is off, `recipes`, `by_category` and `search`
//! list the bundled sample recipes after the stored ones. Samples have no owner,
//! so they can be favorited but never edited or deleted.

use std::collections::BTreeSet;

use tarifhane_store::{
    sample_recipes, CatalogConfig, FavoritesIndex, KeyValueStore, Owner, Recipe, RecipeDraft,
    RecipeError, RecipeQuery, RecipeRepository, Toggle,
};
use tracing::warn;

use crate::auth::{Accounts, CredentialHasher, Session};
use crate::error::CatalogError;
use crate::validation::validate_recipe;

pub struct Catalog<S: KeyValueStore + Clone, H: CredentialHasher> {
    accounts: Accounts<S, H>,
    recipes: RecipeRepository<S>,
    favorites: FavoritesIndex<S>,
    store: S,
    include_samples: bool,
}

impl<S: KeyValueStore + Clone, H: CredentialHasher> Catalog<S, H> {
    pub fn new(store: S, hasher: H, config: CatalogConfig) -> Self {
        Self {
            include_samples: config.recipes.include_samples,
            accounts: Accounts::with_rules(store.clone(), hasher, config.accounts),
            recipes: RecipeRepository::with_config(store.clone(), config.recipes),
            favorites: FavoritesIndex::new(store.clone()),
            store,
        }
    }

    pub fn accounts(&self) -> &Accounts<S, H> {
        &self.accounts
    }

    pub fn recipe_repository(&self) -> &RecipeRepository<S> {
        &self.recipes
    }

    /// Session saved by the last login, for startup.
    pub fn restore_session(&self) -> Result<Session, CatalogError> {
        Ok(Session::restore(&self.store)?)
    }

    /// Stored recipes followed by the matching samples.
    fn with_samples(
        &self,
        mut stored: Vec<Recipe>,
        keep: impl Fn(&Recipe) -> bool,
    ) -> Result<Vec<Recipe>, CatalogError> {
        if self.include_samples {
            stored.extend(sample_recipes()?.into_iter().filter(|r| keep(r)));
        }
        Ok(stored)
    }

    pub fn recipes(&self) -> Result<Vec<Recipe>, CatalogError> {
        self.with_samples(self.recipes.list_all()?, |_| true)
    }

    pub fn community(&self) -> Result<Vec<Recipe>, CatalogError> {
        Ok(self.recipes.list_community()?)
    }

    pub fn by_category(&self, category: &str) -> Result<Vec<Recipe>, CatalogError> {
        self.with_samples(self.recipes.list_by_category(category)?, |r| {
            r.category == category
        })
    }

    pub fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, CatalogError> {
        Ok(query.filter(self.recipes()?))
    }

    pub fn submit_recipe(
        &self,
        session: &Session,
        draft: RecipeDraft,
    ) -> Result<Recipe, CatalogError> {
        let user = session.current().ok_or(CatalogError::NotAuthenticated)?;
        validate_recipe(&draft).map_err(CatalogError::Validation)?;
        Ok(self
            .recipes
            .create(draft, Owner::new(&user.id, &user.username))?)
    }

    pub fn my_recipes(&self, session: &Session) -> Result<Vec<Recipe>, CatalogError> {
        let user_id = session.user_id().ok_or(CatalogError::NotAuthenticated)?;
        Ok(self.recipes.list_by_owner(user_id)?)
    }

    /// Save an edited recipe. `Ok(None)` when the recipe no longer exists.
    pub fn edit_recipe(
        &self,
        session: &Session,
        recipe: Recipe,
    ) -> Result<Option<Recipe>, CatalogError> {
        let user_id = session.user_id().ok_or(CatalogError::NotAuthenticated)?;
        if !recipe.is_owned_by(user_id) {
            warn!(id = recipe.id, user_id, "edit refused for non-owner");
            return Err(RecipeError::NotOwner {
                id: recipe.id,
                user_id: user_id.to_string(),
            }
            .into());
        }
        validate_recipe(&recipe.to_draft()).map_err(CatalogError::Validation)?;
        Ok(self.recipes.update(recipe)?)
    }

    pub fn delete_recipe(&self, session: &Session, id: i64) -> Result<bool, CatalogError> {
        let user_id = session.user_id().ok_or(CatalogError::NotAuthenticated)?;
        Ok(self.recipes.delete(id, user_id)?)
    }

    pub fn toggle_favorite(
        &self,
        session: &Session,
        recipe: &Recipe,
    ) -> Result<Toggle, CatalogError> {
        let user_id = session.user_id().ok_or(CatalogError::NotAuthenticated)?;
        Ok(self.favorites.toggle(user_id, recipe)?)
    }

    pub fn is_favorite(&self, session: &Session, recipe_id: i64) -> Result<bool, CatalogError> {
        match session.user_id() {
            Some(user_id) => Ok(self.favorites.is_favorite(user_id, recipe_id)?),
            None => Ok(false),
        }
    }

    pub fn favorites(&self, session: &Session) -> Result<Vec<Recipe>, CatalogError> {
        match session.user_id() {
            Some(user_id) => Ok(self.favorites.list_for_user(user_id)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn favorite_ids(&self, session: &Session) -> Result<BTreeSet<i64>, CatalogError> {
        match session.user_id() {
            Some(user_id) => Ok(self.favorites.favorite_ids(user_id)?),
            None => Ok(BTreeSet::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PlaintextHasher;
    use crate::validation::{LoginForm, RegisterForm};
    use tarifhane_store::{Difficulty, MemoryStore, SearchScope};

    type TestCatalog = Catalog<MemoryStore, PlaintextHasher>;

    fn catalog() -> TestCatalog {
        let mut config = CatalogConfig::default();
        config.recipes.include_samples = false;
        Catalog::new(MemoryStore::new(), PlaintextHasher, config)
    }

    fn catalog_with_samples() -> TestCatalog {
        Catalog::new(MemoryStore::new(), PlaintextHasher, CatalogConfig::default())
    }

    fn sign_in(catalog: &TestCatalog, username: &str) -> Session {
        let email = format!("{username}@example.com");
        catalog
            .accounts()
            .register(&RegisterForm {
                username: username.to_string(),
                email: email.clone(),
                password: "gizli1".to_string(),
                confirm_password: "gizli1".to_string(),
            })
            .unwrap();
        let mut session = Session::new();
        catalog
            .accounts()
            .login(
                &mut session,
                &LoginForm {
                    email,
                    password: "gizli1".to_string(),
                },
            )
            .unwrap();
        session
    }

    fn menemen() -> RecipeDraft {
        RecipeDraft {
            title: "Menemen".to_string(),
            ingredients: "egg,tomato".to_string(),
            instructions: "cook".to_string(),
            cooking_time: "15 dk".to_string(),
            difficulty: Difficulty::Kolay,
            image: None,
            category: Some("kahvaltilik".to_string()),
        }
    }

    #[test]
    fn test_anonymous_mutations_require_login() {
        let catalog = catalog();
        let anonymous = Session::new();

        assert!(matches!(
            catalog.submit_recipe(&anonymous, menemen()),
            Err(CatalogError::NotAuthenticated)
        ));
        assert!(matches!(
            catalog.my_recipes(&anonymous),
            Err(CatalogError::NotAuthenticated)
        ));
        assert!(matches!(
            catalog.delete_recipe(&anonymous, 1),
            Err(CatalogError::NotAuthenticated)
        ));

        let owner = sign_in(&catalog, "ayse");
        let recipe = catalog.submit_recipe(&owner, menemen()).unwrap();
        assert!(matches!(
            catalog.toggle_favorite(&anonymous, &recipe),
            Err(CatalogError::NotAuthenticated)
        ));
        assert!(!catalog.is_favorite(&anonymous, recipe.id).unwrap());
        assert!(catalog.favorites(&anonymous).unwrap().is_empty());
        assert!(catalog.favorite_ids(&anonymous).unwrap().is_empty());
    }

    #[test]
    fn test_submit_stamps_session_user() {
        let catalog = catalog();
        let session = sign_in(&catalog, "ayse");

        let recipe = catalog.submit_recipe(&session, menemen()).unwrap();
        assert_eq!(Some(recipe.user_id.as_str()), session.user_id());
        assert_eq!(recipe.username, "ayse");

        let mine = catalog.my_recipes(&session).unwrap();
        assert_eq!(mine, vec![recipe.clone()]);

        assert!(catalog.delete_recipe(&session, recipe.id).unwrap());
        assert!(catalog.my_recipes(&session).unwrap().is_empty());
    }

    #[test]
    fn test_submit_validates_draft() {
        let catalog = catalog();
        let session = sign_in(&catalog, "ayse");
        let draft = RecipeDraft {
            title: String::new(),
            ..menemen()
        };

        let err = catalog.submit_recipe(&session, draft).unwrap_err();
        let CatalogError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.get("title").is_some());
        assert!(catalog.recipes().unwrap().is_empty());
    }

    #[test]
    fn test_only_owner_edits_and_deletes() {
        let catalog = catalog();
        let ayse = sign_in(&catalog, "ayse");
        let mehmet = sign_in(&catalog, "mehmet");
        let recipe = catalog.submit_recipe(&ayse, menemen()).unwrap();

        let mut edited = recipe.clone();
        edited.title = "Mehmet'in Menemeni".to_string();
        assert!(matches!(
            catalog.edit_recipe(&mehmet, edited.clone()),
            Err(CatalogError::Recipe(RecipeError::NotOwner { .. }))
        ));
        assert!(matches!(
            catalog.delete_recipe(&mehmet, recipe.id),
            Err(CatalogError::Recipe(RecipeError::NotOwner { .. }))
        ));

        let saved = catalog.edit_recipe(&ayse, edited).unwrap().unwrap();
        assert_eq!(saved.title, "Mehmet'in Menemeni");
        assert_eq!(catalog.recipes().unwrap(), vec![saved]);
    }

    #[test]
    fn test_favorites_follow_session() {
        let catalog = catalog();
        let ayse = sign_in(&catalog, "ayse");
        let mehmet = sign_in(&catalog, "mehmet");
        let recipe = catalog.submit_recipe(&ayse, menemen()).unwrap();

        assert!(catalog.toggle_favorite(&mehmet, &recipe).unwrap().added);
        assert!(catalog.is_favorite(&mehmet, recipe.id).unwrap());
        assert!(!catalog.is_favorite(&ayse, recipe.id).unwrap());
        assert_eq!(catalog.favorites(&mehmet).unwrap().len(), 1);
        assert_eq!(
            catalog.favorite_ids(&mehmet).unwrap(),
            BTreeSet::from([recipe.id])
        );

        assert!(!catalog.toggle_favorite(&mehmet, &recipe).unwrap().added);
        assert!(catalog.favorites(&mehmet).unwrap().is_empty());
    }

    #[test]
    fn test_browse_and_search() {
        let catalog = catalog();
        let session = sign_in(&catalog, "ayse");
        catalog.submit_recipe(&session, menemen()).unwrap();
        catalog
            .submit_recipe(
                &session,
                RecipeDraft {
                    title: "Domates Çorbası".to_string(),
                    ingredients: "domates, un".to_string(),
                    category: None,
                    ..menemen()
                },
            )
            .unwrap();

        assert_eq!(catalog.recipes().unwrap().len(), 2);
        assert_eq!(catalog.community().unwrap().len(), 1);
        assert_eq!(catalog.by_category("kahvaltilik").unwrap().len(), 1);

        let by_title = catalog.search(&RecipeQuery::new("domates")).unwrap();
        assert_eq!(by_title.len(), 1);
        let full = catalog
            .search(&RecipeQuery::new("COOK").with_scope(SearchScope::Full))
            .unwrap();
        assert_eq!(full.len(), 2);
    }

    #[test]
    fn test_category_lists_stored_then_samples() {
        let catalog = catalog_with_samples();
        let samples = sample_recipes().unwrap();
        let sample_breakfasts: Vec<_> = samples
            .iter()
            .filter(|r| r.category == "kahvaltilik")
            .cloned()
            .collect();
        assert!(!sample_breakfasts.is_empty());
        assert_eq!(catalog.by_category("kahvaltilik").unwrap(), sample_breakfasts);

        let session = sign_in(&catalog, "ayse");
        let mine = catalog.submit_recipe(&session, menemen()).unwrap();

        let listed = catalog.by_category("kahvaltilik").unwrap();
        assert_eq!(listed.len(), sample_breakfasts.len() + 1);
        assert_eq!(listed[0], mine);
        assert_eq!(&listed[1..], sample_breakfasts.as_slice());

        assert_eq!(catalog.recipes().unwrap().len(), samples.len() + 1);
        assert!(catalog.community().unwrap().is_empty());
        assert_eq!(catalog.my_recipes(&session).unwrap(), vec![mine]);
    }

    #[test]
    fn test_samples_are_searchable_and_favoritable_but_read_only() {
        let catalog = catalog_with_samples();
        let session = sign_in(&catalog, "ayse");

        let found = catalog.search(&RecipeQuery::new("baklava")).unwrap();
        assert_eq!(found.len(), 1);
        let baklava = found[0].clone();
        assert!(baklava.user_id.is_empty());

        assert!(catalog.toggle_favorite(&session, &baklava).unwrap().added);
        assert_eq!(catalog.favorites(&session).unwrap(), vec![baklava.clone()]);

        let mut edited = baklava.clone();
        edited.title = "Benim Baklavam".to_string();
        assert!(matches!(
            catalog.edit_recipe(&session, edited),
            Err(CatalogError::Recipe(RecipeError::NotOwner { .. }))
        ));
        assert!(!catalog.delete_recipe(&session, baklava.id).unwrap());
        assert_eq!(catalog.search(&RecipeQuery::new("baklava")).unwrap(), vec![baklava]);
    }

    #[test]
    fn test_restore_session_after_login() {
        let catalog = catalog();
        let session = sign_in(&catalog, "ayse");
        assert_eq!(catalog.restore_session().unwrap(), session);
    }
}
