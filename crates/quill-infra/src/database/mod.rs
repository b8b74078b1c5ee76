//! Database connection management and repositories.

mod base;
mod connections;
pub mod entity;
mod repo;

pub use base::SeaOrmRepository;
pub use connections::{DatabaseConfig, connect};
pub use repo::{SeaOrmCommentRepository, SeaOrmPostRepository, SeaOrmUserRepository};
