//! Data Transfer Objects - HTML form submissions.

use serde::{Deserialize, Serialize};

/// Register and login forms share the same fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Create and update forms for a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    pub body: String,
}
