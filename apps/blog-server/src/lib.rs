//! # Quill blog server
//!
//! Application factory pieces: configuration, shared state, middleware and
//! the `/auth` and blog route groups.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
pub mod templates;

pub use config::AppConfig;
pub use handlers::configure_routes;
pub use middleware::session::SessionMiddleware;
pub use state::AppState;
