//! Cookie-backed session middleware and extractor.
//!
//! The cookie holds a signed token (see [`SessionCodec`]); the decoded
//! [`SessionData`] lives in request extensions for the duration of the
//! request and is written back only when a handler changed it.

use std::cell::RefCell;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    error::ErrorInternalServerError,
};

use quill_core::ports::{SessionCodec, SessionData};

use crate::config::CookieConfig;
use crate::state::AppState;

#[derive(Default)]
struct SessionInner {
    data: SessionData,
    changed: bool,
}

/// Handle to the current request's session.
#[derive(Clone)]
pub struct Session(Rc<RefCell<SessionInner>>);

impl Session {
    fn from_data(data: SessionData) -> Self {
        Self(Rc::new(RefCell::new(SessionInner {
            data,
            changed: false,
        })))
    }

    pub fn user_id(&self) -> Option<i32> {
        self.0.borrow().data.user_id
    }

    /// Start a fresh session for `user_id`, dropping anything queued.
    pub fn log_in(&self, user_id: i32) {
        let mut inner = self.0.borrow_mut();
        inner.data = SessionData {
            user_id: Some(user_id),
            flashes: Vec::new(),
        };
        inner.changed = true;
    }

    pub fn clear(&self) {
        let mut inner = self.0.borrow_mut();
        inner.data = SessionData::default();
        inner.changed = true;
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: impl Into<String>) {
        let mut inner = self.0.borrow_mut();
        inner.data.flashes.push(message.into());
        inner.changed = true;
    }

    /// Remove and return every queued message.
    pub fn take_flashes(&self) -> Vec<String> {
        let mut inner = self.0.borrow_mut();
        if inner.data.flashes.is_empty() {
            return Vec::new();
        }
        inner.changed = true;
        std::mem::take(&mut inner.data.flashes)
    }

    fn changes(&self) -> Option<SessionData> {
        let inner = self.0.borrow();
        inner.changed.then(|| inner.data.clone())
    }
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) => ready(Ok(session.clone())),
            None => {
                tracing::error!("Session requested but SessionMiddleware is not installed");
                ready(Err(ErrorInternalServerError("session unavailable")))
            }
        }
    }
}

/// Middleware that loads the session cookie before the handler runs and
/// stores it again afterwards if it changed.
pub struct SessionMiddleware {
    settings: Rc<SessionSettings>,
}

struct SessionSettings {
    codec: Arc<dyn SessionCodec>,
    cookie: CookieConfig,
    max_age: i64,
}

impl SessionMiddleware {
    pub fn new(codec: Arc<dyn SessionCodec>, cookie: CookieConfig, max_age: i64) -> Self {
        Self {
            settings: Rc::new(SessionSettings {
                codec,
                cookie,
                max_age,
            }),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.sessions.clone(),
            state.cookie.clone(),
            state.session_max_age,
        )
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionService {
            service,
            settings: self.settings.clone(),
        }))
    }
}

pub struct SessionService<S> {
    service: S,
    settings: Rc<SessionSettings>,
}

impl<S, B> Service<ServiceRequest> for SessionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let data = req
            .cookie(&self.settings.cookie.name)
            .and_then(|cookie| match self.settings.codec.decode(cookie.value()) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::debug!(error = %e, "Discarding invalid session cookie");
                    None
                }
            })
            .unwrap_or_default();

        let session = Session::from_data(data);
        req.extensions_mut().insert(session.clone());

        let fut = self.service.call(req);
        let settings = self.settings.clone();

        Box::pin(async move {
            let mut res = fut.await?;

            if let Some(data) = session.changes() {
                let cookie = settings.cookie_for(&data)?;
                res.response_mut()
                    .add_cookie(&cookie)
                    .map_err(ErrorInternalServerError)?;
            }

            Ok(res)
        })
    }
}

impl SessionSettings {
    fn cookie_for(&self, data: &SessionData) -> Result<Cookie<'static>, Error> {
        let mut cookie = Cookie::build(self.cookie.name.clone(), String::new())
            .path("/")
            .http_only(true)
            .secure(self.cookie.secure)
            .same_site(SameSite::Lax)
            .finish();

        if data.is_empty() {
            cookie.make_removal();
        } else {
            let token = self.codec.encode(data).map_err(|e| {
                tracing::error!(error = %e, "Failed to encode session");
                ErrorInternalServerError("session encoding failed")
            })?;
            cookie.set_value(token);
            cookie.set_max_age(Duration::seconds(self.max_age));
        }

        Ok(cookie)
    }
}
