//! Use cases shared by the HTTP layer, written against the ports.

pub mod auth;
pub mod blog;

#[cfg(test)]
mod fakes;
