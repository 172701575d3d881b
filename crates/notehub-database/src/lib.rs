//! # notehub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations of the `notehub-entity` store traits.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
