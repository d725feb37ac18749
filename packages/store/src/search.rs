//! Client-side recipe filtering.
//!
//! A [`RecipeQuery`] is a pure predicate applied to listings after they are read;
//! nothing here touches storage.

use crate::models::Recipe;

/// Which text fields a search term is matched against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Title only.
    #[default]
    Title,
    /// Title, ingredients and instructions.
    Full,
}

/// Category restriction of a query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub term: String,
    pub category: CategoryFilter,
    pub scope: SearchScope,
}

impl RecipeQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::Only(category.into());
        self
    }

    /// Case-insensitive substring match. An empty term matches every recipe.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let CategoryFilter::Only(category) = &self.category {
            if &recipe.category != category {
                return false;
            }
        }

        let needle = self.term.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&needle);
        match self.scope {
            SearchScope::Title => contains(&recipe.title),
            SearchScope::Full => {
                contains(&recipe.title)
                    || contains(&recipe.ingredients)
                    || contains(&recipe.instructions)
            }
        }
    }

    pub fn filter(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        recipes.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use rstest::rstest;

    fn recipe(title: &str, ingredients: &str, instructions: &str, category: &str) -> Recipe {
        Recipe {
            id: 1,
            title: title.to_string(),
            ingredients: ingredients.to_string(),
            instructions: instructions.to_string(),
            cooking_time: "20 dk".to_string(),
            difficulty: Difficulty::Kolay,
            image: String::new(),
            user_id: "u1".to_string(),
            username: "ayse".to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let query = RecipeQuery::default();
        assert!(query.matches(&recipe("Menemen", "", "", "kahvaltilik")));
    }

    #[test]
    fn test_title_scope_ignores_ingredients() {
        let menemen = recipe("Menemen", "Domates, biber", "Pişir", "kahvaltilik");
        assert!(RecipeQuery::new("MENE").matches(&menemen));
        assert!(!RecipeQuery::new("domates").matches(&menemen));
        assert!(RecipeQuery::new("domates")
            .with_scope(SearchScope::Full)
            .matches(&menemen));
        assert!(RecipeQuery::new("pişir")
            .with_scope(SearchScope::Full)
            .matches(&menemen));
    }

    #[rstest]
    #[case("", SearchScope::Title, true)]
    #[case("böreği", SearchScope::Title, true)]
    #[case("SU BÖR", SearchScope::Title, true)]
    #[case("peynir", SearchScope::Title, false)]
    #[case("Peynir", SearchScope::Full, true)]
    #[case("fırında", SearchScope::Full, true)]
    #[case("ıspanak", SearchScope::Full, false)]
    fn test_scopes(#[case] term: &str, #[case] scope: SearchScope, #[case] expected: bool) {
        let borek = recipe("Su Böreği", "yufka, peynir", "Fırında pişir", "ana-yemekler");
        assert_eq!(RecipeQuery::new(term).with_scope(scope).matches(&borek), expected);
    }

    #[test]
    fn test_category_filter() {
        let recipes = vec![
            recipe("Mercimek", "", "", "corbalar"),
            recipe("Ezogelin", "", "", "corbalar"),
            recipe("Mercimek Köftesi", "", "", "ana-yemekler"),
        ];

        let soups = RecipeQuery::new("mercimek")
            .in_category("corbalar")
            .filter(recipes.clone());
        assert_eq!(soups.len(), 1);
        assert_eq!(soups[0].title, "Mercimek");

        assert_eq!(RecipeQuery::new("mercimek").filter(recipes).len(), 2);
    }
}
