use async_trait::async_trait;

use crate::domain::{
    Comment, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostWithAuthor, User,
};
use crate::error::RepoError;

/// Generic repository trait defining the shared read/update/delete operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Insert a new user. A taken username yields `RepoError::Constraint`.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// All posts with their authors, newest first.
    async fn list_recent(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;
}

/// Comment repository. Comments are never updated or deleted directly.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// Comments on a post with their authors, oldest first.
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentWithAuthor>, RepoError>;
}
