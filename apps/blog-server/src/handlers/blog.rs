//! Posts and comments.

use actix_web::{HttpResponse, web};
use tera::Context;

use quill_core::DomainError;
use quill_core::domain::{NewComment, NewPost, PostWithAuthor, User};
use quill_core::ports::{BaseRepository, CommentRepository, PostRepository};
use quill_core::services::blog::fetch_post;
use quill_shared::dto::{CommentForm, PostForm};

use super::{redirect, render};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::middleware::session::Session;
use crate::state::AppState;

/// GET / - all posts, most recent first.
pub async fn index(
    state: web::Data<AppState>,
    session: Session,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;

    let mut ctx = Context::new();
    ctx.insert("posts", &posts);
    render(&state, &session, identity.user(), "blog/index.html", ctx)
}

/// GET /create
pub async fn create_form(
    identity: Identity,
    state: web::Data<AppState>,
    session: Session,
) -> AppResult<HttpResponse> {
    let mut ctx = Context::new();
    ctx.insert("form", &PostForm::default());
    render(&state, &session, Some(&identity.0), "blog/create.html", ctx)
}

/// POST /create - new post authored by the current user.
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let user = identity.0;

    match NewPost::new(user.id, form.title.clone(), form.body.clone()) {
        Ok(new_post) => {
            let post = state.posts.create(new_post).await?;
            tracing::info!(post_id = post.id, author_id = user.id, "Post created");
            Ok(redirect("/"))
        }
        Err(DomainError::Validation(msg)) => {
            session.flash(msg);
            let mut ctx = Context::new();
            ctx.insert("form", &form);
            render(&state, &session, Some(&user), "blog/create.html", ctx)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /{id} - a post with its comments.
pub async fn view(
    path: web::Path<i32>,
    state: web::Data<AppState>,
    session: Session,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = fetch_post(&*state.posts, path.into_inner(), identity.user(), false).await?;

    post_page(&state, &session, identity.user(), post, CommentForm::default()).await
}

/// GET /{id}/update
pub async fn update_form(
    identity: Identity,
    path: web::Path<i32>,
    state: web::Data<AppState>,
    session: Session,
) -> AppResult<HttpResponse> {
    let user = identity.0;
    let post = fetch_post(&*state.posts, path.into_inner(), Some(&user), true).await?;

    let form = PostForm {
        title: post.post.title.clone(),
        body: post.post.body.clone(),
    };
    update_page(&state, &session, &user, &post, &form)
}

/// POST /{id}/update - only the author may edit.
pub async fn update(
    identity: Identity,
    path: web::Path<i32>,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let user = identity.0;
    let form = form.into_inner();
    let found = fetch_post(&*state.posts, path.into_inner(), Some(&user), true).await?;

    let mut post = found.post.clone();
    match post.revise(form.title.clone(), form.body.clone()) {
        Ok(()) => {
            let post = state.posts.save(post).await?;
            tracing::info!(post_id = post.id, author_id = user.id, "Post updated");
            Ok(redirect("/"))
        }
        Err(DomainError::Validation(msg)) => {
            session.flash(msg);
            update_page(&state, &session, &user, &found, &form)
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /{id}/delete - only the author may delete; comments go with the post.
pub async fn delete(
    identity: Identity,
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let user = identity.0;
    let post = fetch_post(&*state.posts, path.into_inner(), Some(&user), true).await?;

    state.posts.delete(post.post.id).await?;
    tracing::info!(post_id = post.post.id, author_id = user.id, "Post deleted");

    Ok(redirect("/"))
}

/// GET /{id}/comment
pub async fn comment_form(
    identity: Identity,
    path: web::Path<i32>,
    state: web::Data<AppState>,
    session: Session,
) -> AppResult<HttpResponse> {
    let user = identity.0;
    let post = fetch_post(&*state.posts, path.into_inner(), Some(&user), false).await?;

    post_page(&state, &session, Some(&user), post, CommentForm::default()).await
}

/// POST /{id}/comment - any logged-in user may comment.
pub async fn comment(
    identity: Identity,
    path: web::Path<i32>,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let user = identity.0;
    let form = form.into_inner();
    let post = fetch_post(&*state.posts, path.into_inner(), Some(&user), false).await?;
    let post_id = post.post.id;

    match NewComment::new(user.id, post_id, form.body.clone()) {
        Ok(new_comment) => {
            let comment = state.comments.create(new_comment).await?;
            tracing::info!(comment_id = comment.id, post_id, author_id = user.id, "Comment created");
            Ok(redirect(format!("/{post_id}")))
        }
        Err(DomainError::Validation(msg)) => {
            session.flash(msg);
            post_page(&state, &session, Some(&user), post, form).await
        }
        Err(e) => Err(e.into()),
    }
}

async fn post_page(
    state: &AppState,
    session: &Session,
    user: Option<&User>,
    post: PostWithAuthor,
    form: CommentForm,
) -> AppResult<HttpResponse> {
    let comments = state.comments.list_for_post(post.post.id).await?;

    let mut ctx = Context::new();
    ctx.insert("post", &post);
    ctx.insert("comments", &comments);
    ctx.insert("form", &form);
    render(state, session, user, "blog/post.html", ctx)
}

fn update_page(
    state: &AppState,
    session: &Session,
    user: &User,
    post: &PostWithAuthor,
    form: &PostForm,
) -> AppResult<HttpResponse> {
    let mut ctx = Context::new();
    ctx.insert("post", post);
    ctx.insert("form", form);
    render(state, session, Some(user), "blog/update.html", ctx)
}
