use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::Author;
use crate::error::DomainError;

/// Post entity - a blog post owned by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub created: DateTime<Utc>,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Replace title and body, applying the same rules as creation.
    pub fn revise(&mut self, title: String, body: String) -> Result<(), DomainError> {
        validate(&title, &body)?;
        self.title = title;
        self.body = body;
        Ok(())
    }

    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.author_id == user_id
    }
}

/// A validated post that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i32,
    pub created: DateTime<Utc>,
    pub title: String,
    pub body: String,
}

impl NewPost {
    pub fn new(author_id: i32, title: String, body: String) -> Result<Self, DomainError> {
        validate(&title, &body)?;
        Ok(Self {
            author_id,
            created: Utc::now(),
            title,
            body,
        })
    }
}

/// A post joined with its author, as listed and displayed.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Author,
}

fn validate(title: &str, body: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::Validation("Title is required.".to_string()));
    }
    if body.is_empty() {
        return Err(DomainError::Validation("Body is required.".to_string()));
    }
    Ok(())
}
