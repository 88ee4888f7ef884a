//! # Authstore
//!
//! Persistence layer for user accounts and the authorities (role grants)
//! attached to them, backed by PostgreSQL.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `db`: Connection pooling and migrations
//! - `config`: Configuration management
//! - `error`: Common error types
//!
//! The store enforces username uniqueness at the database level; callers
//! own transaction boundaries and everything above the data layer
//! (authentication, password handling, HTTP) lives elsewhere.

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{StoreError, StoreResult};

/// Current version of the authstore library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
