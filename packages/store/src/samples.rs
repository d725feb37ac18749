//! Built-in sample recipes shipped with the app.
//!
//! The set lives in `data/sample_recipes.json` in the stored [`Recipe`] layout and
//! is compiled into the crate. Sample recipes have no owner (`userId` is empty),
//! so nobody can edit or delete them, and they are never written to storage.

use crate::error::StoreError;
use crate::models::Recipe;

const SAMPLE_RECIPES_JSON: &str = include_str!("../data/sample_recipes.json");

/// Name used when the bundled data fails to parse.
pub const SAMPLES_SOURCE: &str = "sample_recipes";

/// The bundled sample recipes in file order.
pub fn sample_recipes() -> Result<Vec<Recipe>, StoreError> {
    serde_json::from_str(SAMPLE_RECIPES_JSON).map_err(|source| StoreError::Malformed {
        key: SAMPLES_SOURCE.to_string(),
        source,
    })
}
