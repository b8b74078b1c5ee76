//! HTTP handlers and route configuration.

mod auth;
mod blog;

use actix_web::{HttpResponse, http::header, web};
use tera::Context;

use quill_core::domain::User;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::Session;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    // Auth routes
    .service(
        web::scope("/auth")
            .service(
                web::resource("/register")
                    .route(web::get().to(auth::register_form))
                    .route(web::post().to(auth::register)),
            )
            .service(
                web::resource("/login")
                    .route(web::get().to(auth::login_form))
                    .route(web::post().to(auth::login)),
            )
            .route("/logout", web::get().to(auth::logout)),
    )
    // Blog routes
    .route("/", web::get().to(blog::index))
    .service(
        web::resource("/create")
            .route(web::get().to(blog::create_form))
            .route(web::post().to(blog::create)),
    )
    .route(r"/{id:\d+}", web::get().to(blog::view))
    .service(
        web::resource(r"/{id:\d+}/update")
            .route(web::get().to(blog::update_form))
            .route(web::post().to(blog::update)),
    )
    .route(r"/{id:\d+}/delete", web::post().to(blog::delete))
    .service(
        web::resource(r"/{id:\d+}/comment")
            .route(web::get().to(blog::comment_form))
            .route(web::post().to(blog::comment)),
    );
}

/// Render a page, handing it the current user and every pending flash.
fn render(
    state: &AppState,
    session: &Session,
    user: Option<&User>,
    template: &str,
    mut ctx: Context,
) -> AppResult<HttpResponse> {
    ctx.insert("current_user", &user.map(User::author));
    ctx.insert("flashes", &session.take_flashes());

    let html = state.templates.render(template, &ctx)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}
