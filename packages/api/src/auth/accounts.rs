//! # Account flows: register, login, logout, change password
//!
//! [`Accounts`] owns the `users` collection. Each mutating call reads the whole
//! array, checks it, and writes the whole array back.
//!
//! - **register** rejects a username or email that any stored user already has
//!   (case-sensitive), username first, and does not log the new user in.
//! - **login** finds a user with the exact email whose stored credential verifies
//!   against the password, saves the new [`Session`] under `currentUser`, and
//!   only then hands it to the caller. Any mismatch is the single
//!   [`AuthError::InvalidCredentials`].
//! - **logout** removes the saved copy, then ends the in-memory session. A failed
//!   write leaves the caller's session as it was.
//! - **change_password** requires a session, re-checks the current password
//!   against the stored record, then stores the new credential.
//!
//! Every input form is validated first; a validation failure never reads storage.

use tarifhane_store::config::AccountsConfig;
use tarifhane_store::kv::{load_collection, save_collection, USERS_KEY};
use tarifhane_store::models::next_id;
use tarifhane_store::{KeyValueStore, StoreError, User};
use tracing::{info, warn};

use super::password::CredentialHasher;
use super::session::Session;
use crate::error::AuthError;
use crate::models::UserInfo;
use crate::validation::{ChangePasswordForm, LoginForm, RegisterForm};

/// Account operations over the `users` collection.
#[derive(Clone, Debug)]
pub struct Accounts<S: KeyValueStore, H: CredentialHasher> {
    store: S,
    hasher: H,
    rules: AccountsConfig,
}

impl<S: KeyValueStore, H: CredentialHasher> Accounts<S, H> {
    pub fn new(store: S, hasher: H) -> Self {
        Self::with_rules(store, hasher, AccountsConfig::default())
    }

    pub fn with_rules(store: S, hasher: H, rules: AccountsConfig) -> Self {
        Self {
            store,
            hasher,
            rules,
        }
    }

    fn load(&self) -> Result<Vec<User>, AuthError> {
        Ok(load_collection(&self.store, USERS_KEY)?)
    }

    fn save(&self, users: &[User]) -> Result<(), AuthError> {
        Ok(save_collection(&self.store, USERS_KEY, users)?)
    }

    /// Every stored user.
    pub fn users(&self) -> Result<Vec<User>, AuthError> {
        self.load()
    }

    /// Create an account. The caller logs in separately.
    pub fn register(&self, form: &RegisterForm) -> Result<User, AuthError> {
        form.validate(&self.rules).map_err(AuthError::Validation)?;

        let mut users = self.load()?;
        if users.iter().any(|u| u.username == form.username) {
            warn!(username = %form.username, "registration with taken username");
            return Err(AuthError::DuplicateUsername);
        }
        if users.iter().any(|u| u.email == form.email) {
            warn!(email = %form.email, "registration with taken email");
            return Err(AuthError::DuplicateEmail);
        }

        let latest = users.iter().filter_map(|u| u.id.parse::<i64>().ok()).max();
        let id = next_id(latest).ok_or_else(|| StoreError::IdsExhausted {
            key: USERS_KEY.to_string(),
        })?;
        let user = User {
            id: id.to_string(),
            username: form.username.clone(),
            email: form.email.clone(),
            password: self.hasher.hash(&form.password)?,
        };
        users.push(user.clone());
        self.save(&users)?;

        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Check credentials and begin `session` on success.
    pub fn login(&self, session: &mut Session, form: &LoginForm) -> Result<UserInfo, AuthError> {
        form.validate().map_err(AuthError::Validation)?;

        let users = self.load()?;
        let user = users
            .iter()
            .filter(|u| u.email == form.email)
            .find(|u| self.credential_matches(&form.password, u))
            .ok_or_else(|| {
                warn!(email = %form.email, "login rejected");
                AuthError::InvalidCredentials
            })?;

        let info = UserInfo::from(user);
        let mut next = Session::new();
        next.begin(info.clone());
        next.persist(&self.store)?;
        *session = next;

        info!(user_id = %info.id, "user logged in");
        Ok(info)
    }

    pub fn logout(&self, session: &mut Session) -> Result<(), AuthError> {
        Session::new().persist(&self.store)?;
        if let Some(user_id) = session.user_id() {
            info!(user_id, "user logged out");
        }
        session.end();
        Ok(())
    }

    /// Replace the logged-in user's password after re-checking the current one.
    pub fn change_password(
        &self,
        session: &Session,
        form: &ChangePasswordForm,
    ) -> Result<(), AuthError> {
        let user_id = session.user_id().ok_or(AuthError::NotAuthenticated)?;
        form.validate(&self.rules).map_err(AuthError::Validation)?;

        let mut users = self.load()?;
        let Some(pos) = users.iter().position(|u| u.id == user_id) else {
            warn!(user_id, "password change for unknown user");
            return Err(AuthError::UserNotFound);
        };
        if !self.credential_matches(&form.current_password, &users[pos]) {
            warn!(user_id, "password change with wrong current password");
            return Err(AuthError::WrongCurrentPassword);
        }

        users[pos].password = self.hasher.hash(&form.new_password)?;
        self.save(&users)?;

        info!(user_id, "password changed");
        Ok(())
    }

    /// A stored credential the hasher cannot read counts as a mismatch.
    fn credential_matches(&self, password: &str, user: &User) -> bool {
        self.hasher
            .verify(password, &user.password)
            .unwrap_or_else(|err| {
                warn!(user_id = %user.id, %err, "unreadable stored credential");
                false
            })
    }
}
