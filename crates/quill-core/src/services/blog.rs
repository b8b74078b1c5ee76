//! Post lookup with ownership checks.

use crate::domain::{PostWithAuthor, User};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Get a post and its author by id.
///
/// Fails with `NotFound` if the post doesn't exist and, when `check_author`
/// is set, with `Forbidden` unless `viewer` wrote it.
pub async fn fetch_post(
    posts: &dyn PostRepository,
    id: i32,
    viewer: Option<&User>,
    check_author: bool,
) -> Result<PostWithAuthor, DomainError> {
    let post = posts
        .find_with_author(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    if check_author && !viewer.is_some_and(|user| post.post.is_authored_by(user.id)) {
        return Err(DomainError::Forbidden);
    }

    Ok(post)
}
