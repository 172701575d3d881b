//! # notehub-cache
//!
//! Read-through caching for externally-fetched configuration secrets.
//! This cache is the only shared mutable state in the process; everything
//! else is request-scoped.

pub mod secrets;
pub mod source;

pub use secrets::SecretCache;
pub use source::{EnvSecretSource, SecretSource};
