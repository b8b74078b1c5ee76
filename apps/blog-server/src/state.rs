//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use quill_core::ports::{
    CommentRepository, PasswordService, PostRepository, SessionCodec, UserRepository,
};
use quill_infra::database::{SeaOrmCommentRepository, SeaOrmPostRepository, SeaOrmUserRepository};
use quill_infra::{Argon2PasswordService, JwtSessionCodec};

use crate::config::{AppConfig, CookieConfig};
use crate::templates::Templates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub sessions: Arc<dyn SessionCodec>,
    pub cookie: CookieConfig,
    /// Session cookie max-age, matching the token lifetime.
    pub session_max_age: i64,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Connect the database, bring the schema up to date and build services.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        if config.database.is_none() {
            // ensure the instance folder exists
            std::fs::create_dir_all(&config.instance_path).with_context(|| {
                format!("creating instance folder {}", config.instance_path.display())
            })?;
        }

        let db = quill_infra::connect(&config.database_config())
            .await
            .context("connecting to the database")?;
        Migrator::up(&db, None)
            .await
            .context("applying database migrations")?;
        let db = Arc::new(db);

        let sessions = JwtSessionCodec::new(config.session.clone());
        let session_max_age = sessions.lifetime_seconds();

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            posts: Arc::new(SeaOrmPostRepository::new(db.clone())),
            comments: Arc::new(SeaOrmCommentRepository::new(db)),
            passwords: Arc::new(Argon2PasswordService::new()),
            sessions: Arc::new(sessions),
            cookie: config.cookie.clone(),
            session_max_age,
            templates: Arc::new(Templates::new()?),
        })
    }

    /// Replace the password hasher.
    pub fn with_passwords(mut self, passwords: Arc<dyn PasswordService>) -> Self {
        self.passwords = passwords;
        self
    }
}
