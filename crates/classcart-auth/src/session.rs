//! Session snapshot persistence.

use crate::user::PresetUser;
use crate::AuthError;
use classcart_cache::Store;
use classcart_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// The login snapshot persisted across navigation: who is signed in.
///
/// No token, no expiry — the demo login carries identity for display only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl Session {
    /// Snapshot a preset user (the password is never persisted).
    pub fn for_user(user: &PresetUser) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Stores the current session snapshot.
pub struct SessionStore {
    store: Store,
}

impl SessionStore {
    const KEY: &'static str = "session:current";

    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open over the default key-value store.
    pub fn open_default() -> Result<Self, AuthError> {
        Ok(Self::new(Store::open_default()?))
    }

    /// Persist the session snapshot.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        self.store.set(Self::KEY, session)?;
        Ok(())
    }

    /// Remove the session snapshot.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.store.delete(Self::KEY)?;
        Ok(())
    }

    /// The stored session, if any. Absence, corruption, or an unreadable
    /// store all degrade to logged-out; startup never fails here.
    pub fn restore(&self) -> Option<Session> {
        self.store.get(Self::KEY).ok().flatten()
    }
}
