//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::{COMMENT_BODY_MAX_CHARS, Comment, CommentWithAuthor, NewComment};
pub use post::{NewPost, Post, PostWithAuthor};
pub use user::{Author, NewUser, User};
