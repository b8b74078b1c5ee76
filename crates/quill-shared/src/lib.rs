//! # Quill Shared
//!
//! Wire types shared by the server and its tests: submitted forms and
//! problem-details error bodies.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
