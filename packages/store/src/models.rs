//! # Domain models for users, recipes and favorites
//!
//! The structs here are exactly what sits in storage: each collection key holds a
//! JSON array of one of these types. Field names serialize in camelCase
//! (`cookingTime`, `userId`) so the stored layout matches what the web client has
//! always written.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A registered account. `password` holds whatever the credential hasher produced (a PHC string, or plaintext for legacy records). |
//! | [`Recipe`] | A stored recipe with its owner stamped in (`user_id`, `username`). |
//! | [`RecipeDraft`] | What a submission form produces before the repository assigns an id and owner. |
//! | [`FavoriteLink`] | A user's favorite, embedding a snapshot of the recipe taken when it was favorited. |
//! | [`Category`] | An entry of the fixed category catalog, see [`CATEGORIES`]. |
//!
//! Favorites embed the recipe by value, not by id. Editing a recipe later does not
//! touch the snapshot, so a favorites listing can show an older title.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category id for recipes submitted by the community.
pub const COMMUNITY_CATEGORY: &str = "sizden-gelenler";

/// Username stamped on recipes whose owner has no username.
pub const UNKNOWN_USERNAME: &str = "Bilinmiyor";

/// A registered account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Millisecond timestamp rendered as a string: "1718000000000"
    pub id: String,
    pub username: String,
    pub email: String,
    /// Stored credential as produced by the configured hasher.
    pub password: String,
}

/// How hard a recipe is to make.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Kolay,
    Orta,
    Zor,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Kolay, Difficulty::Orta, Difficulty::Zor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Kolay => "Kolay",
            Difficulty::Orta => "Orta",
            Difficulty::Zor => "Zor",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty '{0}' (expected Kolay, Orta or Zor)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// A recipe as stored in the `recipes` collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Millisecond creation timestamp, unique within one store.
    pub id: i64,
    pub title: String,
    /// Free text, one ingredient per line.
    pub ingredients: String,
    pub instructions: String,
    /// Display string such as "15 dk".
    pub cooking_time: String,
    pub difficulty: Difficulty,
    /// Image URL or `data:` URL.
    pub image: String,
    pub user_id: String,
    pub username: String,
    /// Category id from [`CATEGORIES`] or [`COMMUNITY_CATEGORY`].
    pub category: String,
}

impl Recipe {
    /// Ownerless records (the bundled samples) belong to nobody.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !self.user_id.is_empty() && self.user_id == user_id
    }

    pub fn is_community(&self) -> bool {
        self.category == COMMUNITY_CATEGORY
    }

    /// The editable fields of this recipe as a draft.
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: self.title.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            cooking_time: self.cooking_time.clone(),
            difficulty: self.difficulty,
            image: Some(self.image.clone()),
            category: Some(self.category.clone()),
        }
    }
}

/// A recipe submission before it has an id or owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: String,
    pub difficulty: Difficulty,
    /// `None` or empty means the placeholder image.
    pub image: Option<String>,
    /// `None` files the recipe under [`COMMUNITY_CATEGORY`].
    pub category: Option<String>,
}

/// The user a new recipe is stamped with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Owner<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

impl<'a> Owner<'a> {
    pub fn new(id: &'a str, username: &'a str) -> Self {
        Self { id, username }
    }
}

/// One entry of the `favorites` collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteLink {
    pub user_id: String,
    /// Snapshot of the recipe at the time it was favorited.
    pub recipe: Recipe,
}

/// An entry of the fixed category catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

/// Categories offered when browsing or filing a recipe.
pub const CATEGORIES: &[Category] = &[
    Category { id: "ana-yemekler", name: "Ana Yemekler" },
    Category { id: "corbalar", name: "Çorbalar" },
    Category { id: "tatlilar", name: "Tatlılar" },
    Category { id: "salatalar", name: "Salatalar" },
    Category { id: "kahvaltilik", name: "Kahvaltılıklar" },
    Category { id: "icecekler", name: "İçecekler" },
    Category { id: COMMUNITY_CATEGORY, name: "Sizden Gelenler" },
];

/// Look up a catalog entry by id.
pub fn find_category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Display name for a category id; unknown ids display as themselves.
pub fn category_name(id: &str) -> &str {
    find_category(id).map_or(id, |c| c.name)
}

/// Next timestamp id: the current time in milliseconds, or one past `latest`
/// when the clock has not moved beyond it.
///
/// Returns `None` once `latest` is `i64::MAX`.
pub fn next_id(latest: Option<i64>) -> Option<i64> {
    let now = chrono::Utc::now().timestamp_millis();
    match latest {
        Some(last) if last >= now => last.checked_add(1),
        _ => Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            id: 1718000000000,
            title: "Menemen".to_string(),
            ingredients: "egg,tomato".to_string(),
            instructions: "cook".to_string(),
            cooking_time: "15 dk".to_string(),
            difficulty: Difficulty::Kolay,
            image: "/src/yemek/default.jpg".to_string(),
            user_id: "u1".to_string(),
            username: "ayse".to_string(),
            category: "kahvaltilik".to_string(),
        }
    }

    #[test]
    fn test_recipe_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_recipe()).unwrap();
        assert_eq!(json["cookingTime"], "15 dk");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["difficulty"], "Kolay");
        assert_eq!(json["id"], 1718000000000i64);
        assert!(json.get("cooking_time").is_none());
    }

    #[test]
    fn test_recipe_reads_stored_layout() {
        let raw = r#"{"id":1,"title":"Ayran","ingredients":"yoğurt","instructions":"çırp",
            "cookingTime":"5 dk","difficulty":"Zor","image":"x.jpg","userId":"7",
            "username":"mehmet","category":"icecekler"}"#;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Zor);
        assert_eq!(recipe.user_id, "7");
        assert!(!recipe.is_community());
    }

    #[test]
    fn test_favorite_link_layout() {
        let link = FavoriteLink {
            user_id: "u2".to_string(),
            recipe: sample_recipe(),
        };
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["userId"], "u2");
        assert_eq!(json["recipe"]["title"], "Menemen");
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Orta".parse::<Difficulty>(), Ok(Difficulty::Orta));
        assert_eq!(
            "orta".parse::<Difficulty>(),
            Err(ParseDifficultyError("orta".to_string()))
        );
        assert_eq!(Difficulty::default(), Difficulty::Kolay);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(category_name("corbalar"), "Çorbalar");
        assert_eq!(category_name(COMMUNITY_CATEGORY), "Sizden Gelenler");
        assert_eq!(category_name("bilinmeyen"), "bilinmeyen");
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let first = next_id(None).unwrap();
        assert!(next_id(Some(first)).unwrap() > first);
        assert_eq!(next_id(Some(i64::MAX - 1)), Some(i64::MAX));
    }

    #[test]
    fn test_next_id_stops_at_max() {
        assert_eq!(next_id(Some(i64::MAX)), None);
        assert!(next_id(Some(i64::MIN)).is_some());
    }
}
