//! Registration, login and logout.

use actix_web::{HttpResponse, web};
use serde_json::json;
use tera::Context;

use quill_core::DomainError;
use quill_core::services::auth;
use quill_shared::dto::CredentialsForm;

use super::{redirect, render};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppResult, LOGIN_PATH};
use crate::middleware::session::Session;
use crate::state::AppState;

fn credentials_page(
    state: &AppState,
    session: &Session,
    identity: &OptionalIdentity,
    template: &str,
    username: &str,
) -> AppResult<HttpResponse> {
    // Never echo the password back into the page.
    let mut ctx = Context::new();
    ctx.insert("form", &json!({ "username": username }));
    render(state, session, identity.user(), template, ctx)
}

/// GET /auth/register
pub async fn register_form(
    state: web::Data<AppState>,
    session: Session,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    credentials_page(&state, &session, &identity, "auth/register.html", "")
}

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    session: Session,
    identity: OptionalIdentity,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match auth::register(&*state.users, &*state.passwords, &form.username, &form.password).await
    {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "User registered");
            Ok(redirect(LOGIN_PATH))
        }
        Err(DomainError::Validation(msg) | DomainError::Duplicate(msg)) => {
            tracing::debug!(username = %form.username, reason = %msg, "Registration rejected");
            session.flash(msg);
            credentials_page(
                &state,
                &session,
                &identity,
                "auth/register.html",
                &form.username,
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /auth/login
pub async fn login_form(
    state: web::Data<AppState>,
    session: Session,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    credentials_page(&state, &session, &identity, "auth/login.html", "")
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    session: Session,
    identity: OptionalIdentity,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match auth::authenticate(&*state.users, &*state.passwords, &form.username, &form.password)
        .await
    {
        Ok(user) => {
            // store the user id in a new session and return to the index
            session.log_in(user.id);
            tracing::info!(user_id = user.id, username = %user.username, "User logged in");
            Ok(redirect("/"))
        }
        Err(DomainError::Validation(msg)) => {
            tracing::debug!(username = %form.username, reason = %msg, "Login rejected");
            session.flash(msg);
            credentials_page(&state, &session, &identity, "auth/login.html", &form.username)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /auth/logout
pub async fn logout(session: Session) -> HttpResponse {
    if let Some(user_id) = session.user_id() {
        tracing::info!(user_id, "User logged out");
    }
    session.clear();
    redirect("/")
}
