//! Preset demo users.

use classcart_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// A preset demo credential. Plaintext by design: the login flow is a
/// client-side demo, not a security boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresetUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The fixed directory the demo login matches against.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<PresetUser>,
}

impl UserDirectory {
    /// The stock demo directory.
    pub fn demo() -> Self {
        Self {
            users: vec![
                PresetUser {
                    id: UserId::new("1"),
                    name: "Parent User".to_string(),
                    email: "parent@example.com".to_string(),
                    password: "123".to_string(),
                },
                PresetUser {
                    id: UserId::new("2"),
                    name: "Student User".to_string(),
                    email: "student@example.com".to_string(),
                    password: "234".to_string(),
                },
            ],
        }
    }

    /// A directory with custom preset users.
    pub fn with_users(users: Vec<PresetUser>) -> Self {
        Self { users }
    }

    /// Match credentials against the directory. Email is compared trimmed and
    /// lowercased; the password must match exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&PresetUser> {
        let email = email.trim().to_lowercase();
        self.users
            .iter()
            .find(|u| u.email == email && u.password == password)
    }
}
