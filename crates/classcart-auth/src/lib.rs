//! Fixed-credential demo login for classcart.
//!
//! Matches submitted credentials against a preset user directory and persists
//! a `{id, name, email}` session snapshot through classcart-cache. This is a
//! demo flow, not a security boundary: there is no hashing, no token, and no
//! authorization model.
//!
//! # Example
//!
//! ```rust,ignore
//! use classcart_auth::Auth;
//!
//! let auth = Auth::demo()?;
//!
//! // On startup: absent or corrupt snapshots read as logged-out.
//! let current = auth.restore();
//!
//! let session = auth.login("parent@example.com", "123")?;
//! assert_eq!(session.name, "Parent User");
//!
//! auth.logout()?;
//! ```

mod error;
mod session;
mod user;

pub use error::AuthError;
pub use session::{Session, SessionStore};
pub use user::{PresetUser, UserDirectory};

/// The demo login flow: a preset directory plus the persisted session.
pub struct Auth {
    directory: UserDirectory,
    sessions: SessionStore,
}

impl Auth {
    /// Demo directory over the default session store.
    pub fn demo() -> Result<Self, AuthError> {
        Ok(Self::new(UserDirectory::demo(), SessionStore::open_default()?))
    }

    pub fn new(directory: UserDirectory, sessions: SessionStore) -> Self {
        Self {
            directory,
            sessions,
        }
    }

    /// Log in with preset credentials, persisting the session snapshot.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let user = self
            .directory
            .authenticate(email, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::for_user(user);
        self.sessions.save(&session)?;
        Ok(session)
    }

    /// Log out, removing the persisted snapshot.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()
    }

    /// The persisted session, if any; degrades to logged-out on absence or
    /// corruption.
    pub fn restore(&self) -> Option<Session> {
        self.sessions.restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_persists_session() {
        let auth = Auth::demo().unwrap();
        let session = auth.login("parent@example.com", "123").unwrap();
        assert_eq!(session.email, "parent@example.com");
        assert_eq!(auth.restore(), Some(session));
    }

    #[test]
    fn test_login_missing_credentials() {
        let auth = Auth::demo().unwrap();
        assert!(matches!(
            auth.login("", "123").unwrap_err(),
            AuthError::MissingCredentials
        ));
        assert!(matches!(
            auth.login("parent@example.com", "").unwrap_err(),
            AuthError::MissingCredentials
        ));
    }

    #[test]
    fn test_login_bad_credentials_leaves_no_session() {
        let auth = Auth::demo().unwrap();
        assert!(matches!(
            auth.login("parent@example.com", "wrong").unwrap_err(),
            AuthError::InvalidCredentials
        ));
        assert!(auth.restore().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let auth = Auth::demo().unwrap();
        auth.login("student@example.com", "234").unwrap();
        auth.logout().unwrap();
        assert!(auth.restore().is_none());
    }
}
