use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::Author;
use crate::error::DomainError;

/// Longest comment body accepted, in characters.
pub const COMMENT_BODY_MAX_CHARS: usize = 250;

/// Comment entity. Comments are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub created: DateTime<Utc>,
    pub body: String,
    pub author_id: i32,
    pub post_id: i32,
}

/// A validated comment that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub created: DateTime<Utc>,
    pub body: String,
    pub author_id: i32,
    pub post_id: i32,
}

impl NewComment {
    pub fn new(author_id: i32, post_id: i32, body: String) -> Result<Self, DomainError> {
        if body.is_empty() {
            return Err(DomainError::Validation(
                "Comment body is required.".to_string(),
            ));
        }
        if body.chars().count() > COMMENT_BODY_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "Comment body must be at most {COMMENT_BODY_MAX_CHARS} characters."
            )));
        }

        Ok(Self {
            created: Utc::now(),
            body,
            author_id,
            post_id,
        })
    }
}

/// A comment joined with its author.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Author,
}
