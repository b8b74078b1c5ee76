//! Authentication and session ports.

use serde::{Deserialize, Serialize};

/// State carried by the client-side session token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Id of the logged-in user, if any.
    pub user_id: Option<i32>,
    /// Flash messages not yet shown to the user.
    pub flashes: Vec<String>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.flashes.is_empty()
    }
}

/// Encodes session state into a signed token and back.
///
/// Implementations must reject tokens they did not sign.
pub trait SessionCodec: Send + Sync {
    fn encode(&self, data: &SessionData) -> Result<String, AuthError>;

    fn decode(&self, token: &str) -> Result<SessionData, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Session encoding error: {0}")]
    Encoding(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
