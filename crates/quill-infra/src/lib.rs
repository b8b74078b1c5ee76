//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM repositories (SQLite or PostgreSQL), Argon2 password hashing and
//! the signed session token codec.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtSessionCodec, SessionConfig};
pub use database::{DatabaseConfig, connect};
