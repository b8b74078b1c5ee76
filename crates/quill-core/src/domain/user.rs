use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - a registered account.
///
/// Not `Serialize`: the password hash must not leak into rendered pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created: DateTime<Utc>,
}

impl User {
    /// Public profile of this user.
    pub fn author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub created: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created: Utc::now(),
        }
    }
}

/// Public information about the author of a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub username: String,
}
