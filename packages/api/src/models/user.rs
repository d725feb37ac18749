//! # Session-facing user projection
//!
//! [`UserInfo`] is what the rest of the app sees of an account: id, username and
//! email. It omits the stored credential so it can be held in a [`crate::Session`],
//! persisted under the `currentUser` key, and rendered freely.
//! Convert a stored [`User`] with `UserInfo::from(&user)`.

use serde::{Deserialize, Serialize};
use tarifhane_store::User;

/// User information safe to keep in the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl UserInfo {
    /// Get display name, falling back to email if username is empty.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}
