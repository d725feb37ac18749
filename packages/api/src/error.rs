//! Errors surfaced to the presentation layer.

use tarifhane_store::{RecipeError, StoreError};
use thiserror::Error;

use crate::auth::HashError;
use crate::validation::ValidationErrors;

/// Failure of an account operation.
/// The messages users can fix are in Turkish, matching the form validation.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    Validation(ValidationErrors),

    #[error("Bu kullanıcı adı zaten kullanılıyor")]
    DuplicateUsername,

    #[error("Bu e-posta adresi zaten kullanılıyor")]
    DuplicateEmail,

    /// Email or password did not match; deliberately does not say which.
    #[error("E-posta veya şifre hatalı")]
    InvalidCredentials,

    #[error("Giriş yapmalısınız")]
    NotAuthenticated,

    #[error("Kullanıcı bulunamadı")]
    UserNotFound,

    #[error("Mevcut şifre hatalı")]
    WrongCurrentPassword,

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    /// The form field an inline message for this error belongs next to.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AuthError::DuplicateUsername => Some("username"),
            AuthError::DuplicateEmail | AuthError::InvalidCredentials => Some("email"),
            AuthError::WrongCurrentPassword => Some("currentPassword"),
            _ => None,
        }
    }
}


/// Failure of a session-gated catalog operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No one is logged in; the caller should send the user to the login page.
    #[error("Giriş yapmalısınız")]
    NotAuthenticated,

    #[error("invalid input: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
