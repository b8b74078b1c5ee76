//! Identity extractors: resolve the session's user and guard routes.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;

use quill_core::domain::User;
use quill_core::ports::BaseRepository;

use super::error::AppError;
use super::session::Session;
use crate::state::AppState;

/// The logged-in user, if any.
///
/// A session naming a user that no longer exists counts as anonymous.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<User>);

impl OptionalIdentity {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl FromRequest for OptionalIdentity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req.extensions().get::<Session>().and_then(Session::user_id);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let Some(user_id) = user_id else {
                return Ok(OptionalIdentity(None));
            };
            let state = state.ok_or_else(|| {
                AppError::Internal("AppState not found in app data".to_string())
            })?;

            let user = state.users.find_by_id(user_id).await?;
            if user.is_none() {
                tracing::debug!(user_id, "Session refers to a missing user");
            }
            Ok(OptionalIdentity(user))
        })
    }
}

/// Authenticated user identity extractor.
///
/// Use this in handlers to require a login; anonymous requests are
/// redirected to the login page:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.0.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub User);

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let optional = OptionalIdentity::from_request(req, payload);

        Box::pin(async move {
            match optional.await? {
                OptionalIdentity(Some(user)) => Ok(Identity(user)),
                OptionalIdentity(None) => Err(AppError::LoginRequired),
            }
        })
    }
}
