//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use quill_infra::{DatabaseConfig, SessionConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the default SQLite database.
    pub instance_path: PathBuf,
    /// Explicit database; `None` means a SQLite file in `instance_path`.
    pub database: Option<DatabaseConfig>,
    pub session: SessionConfig,
    pub cookie: CookieConfig,
}

/// Attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            instance_path: PathBuf::from("instance"),
            database: None,
            session: SessionConfig::default(),
            cookie: CookieConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let instance_path = env::var("INSTANCE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.instance_path);

        // Some deploy systems set the database url in the environment.
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let base = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(base.max_connections),
                min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(base.min_connections),
                ..base
            }
        });

        let session = SessionConfig {
            secret: Self::secret_key(&defaults.session.secret),
            lifetime_hours: parse_var("SESSION_LIFETIME_HOURS")
                .unwrap_or(defaults.session.lifetime_hours),
            issuer: defaults.session.issuer,
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            instance_path,
            database,
            session,
            cookie: CookieConfig {
                secure: env::var("SESSION_COOKIE_SECURE")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
                ..defaults.cookie
            },
        }
    }

    /// The configured database, defaulting to `quill.sqlite` in the instance folder.
    pub fn database_config(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_else(|| {
            DatabaseConfig::sqlite_file(&self.instance_path.join("quill.sqlite"))
        })
    }

    fn secret_key(default: &str) -> String {
        let secret = env::var("SECRET_KEY").unwrap_or_else(|_| default.to_string());

        // Warn if using default secret in production
        if secret == default {
            let is_production = env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default session secret in production! Set SECRET_KEY environment variable."
                );
            } else {
                tracing::warn!("Using default session secret. Set SECRET_KEY for production use.");
            }
        }

        secret
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
