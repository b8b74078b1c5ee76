//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! This crate contains the blog's rules (validation, ownership, credential
//! checks) with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
