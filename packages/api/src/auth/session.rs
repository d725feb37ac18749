//! Session state: who is logged in.
//!
//! [`Session`] is an explicit context object owned by whatever drives the UI and
//! passed into the operations that need it. It starts empty, is set by a
//! successful login and cleared by logout.

use serde::{Deserialize, Serialize};
use tarifhane_store::kv::{load_value, save_value, SESSION_KEY};
use tarifhane_store::{KeyValueStore, StoreError};

use crate::models::UserInfo;

/// The currently authenticated user, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: Option<UserInfo>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn begin(&mut self, user: UserInfo) {
        self.user = Some(user);
    }

    pub fn end(&mut self) {
        self.user = None;
    }

    /// Rebuild the session saved by [`persist`](Self::persist), e.g. after a reload.
    pub fn restore<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, StoreError> {
        let user = load_value::<UserInfo, _>(store, SESSION_KEY)?;
        Ok(Self { user })
    }

    /// Save the current user, or clear the saved one when logged out.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), StoreError> {
        match &self.user {
            Some(user) => save_value(store, SESSION_KEY, user),
            None => store.remove(SESSION_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarifhane_store::MemoryStore;

    fn ayse() -> UserInfo {
        UserInfo {
            id: "1718000000000".to_string(),
            username: "ayse".to_string(),
            email: "ayse@example.com".to_string(),
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.user_id().is_none());

        session.begin(ayse());
        assert_eq!(session.user_id(), Some("1718000000000"));
        assert_eq!(session.current().map(|u| u.username.as_str()), Some("ayse"));

        session.end();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_persist_and_restore() {
        let store = MemoryStore::new();
        assert_eq!(Session::restore(&store).unwrap(), Session::new());

        let mut session = Session::new();
        session.begin(ayse());
        session.persist(&store).unwrap();
        assert_eq!(Session::restore(&store).unwrap(), session);

        session.end();
        session.persist(&store).unwrap();
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }
}
