//! Errors raised by the storage layer.

use thiserror::Error;

/// Failure reading or writing a key in a [`crate::KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored value for `key` is not valid JSON for the expected type.
    #[error("malformed data under key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize data for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Browser storage is missing, full, or refused the operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The collection under `key` already holds the largest representable id.
    #[error("no ids left in collection '{key}'")]
    IdsExhausted { key: String },
}

/// Failure of a [`crate::RecipeRepository`] operation.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// The recipe exists but belongs to someone else.
    #[error("recipe {id} is not owned by user '{user_id}'")]
    NotOwner { id: i64, user_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
