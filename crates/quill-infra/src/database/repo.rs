//! SeaORM repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use quill_core::domain::{
    Author, Comment, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostWithAuthor, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::base::{SeaOrmRepository, query_error, write_error};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// SeaORM user repository.
pub type SeaOrmUserRepository = SeaOrmRepository<UserEntity>;

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

/// SeaORM comment repository.
pub type SeaOrmCommentRepository = SeaOrmRepository<CommentEntity>;

/// Attach the joined author, which the foreign key guarantees exists.
fn with_author<M, T>(
    row: (M, Option<user::Model>),
    owner: &str,
    id: i32,
) -> Result<(T, Author), RepoError>
where
    T: From<M>,
{
    match row {
        (model, Some(author)) => Ok((model.into(), author.into())),
        (_, None) => Err(RepoError::Query(format!("{owner} {id} has no author"))),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new: NewUser) -> Result<User, RepoError> {
        tracing::debug!(username = %new.username, "Inserting user");

        let active: user::ActiveModel = new.into();
        let model = active.insert(self.db.as_ref()).await.map_err(write_error)?;

        Ok(model.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn create(&self, new: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new.into();
        let model = active.insert(self.db.as_ref()).await.map_err(write_error)?;

        Ok(model.into())
    }

    async fn list_recent(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::Created)
            .order_by_desc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        rows.into_iter()
            .map(|row| {
                let id = row.0.id;
                let (post, author) = with_author::<_, Post>(row, "Post", id)?;
                Ok(PostWithAuthor { post, author })
            })
            .collect()
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(self.db.as_ref())
            .await
            .map_err(query_error)?;

        row.map(|row| {
            let (post, author) = with_author::<_, Post>(row, "Post", id)?;
            Ok(PostWithAuthor { post, author })
        })
        .transpose()
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn create(&self, new: NewComment) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = new.into();
        let model = active.insert(self.db.as_ref()).await.map_err(write_error)?;

        Ok(model.into())
    }

    async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_asc(comment::Column::Created)
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(query_error)?;

        rows.into_iter()
            .map(|row| {
                let id = row.0.id;
                let (comment, author) = with_author::<_, Comment>(row, "Comment", id)?;
                Ok(CommentWithAuthor { comment, author })
            })
            .collect()
    }
}
