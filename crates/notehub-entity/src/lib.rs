//! # notehub-entity
//!
//! Domain models for NoteHub, plus the store traits describing the
//! persistence collaborators. Repositories in `notehub-database`
//! implement these traits; tests substitute in-memory versions.

pub mod note;
pub mod organization;
pub mod role;
pub mod store;
pub mod token;
pub mod user;

pub use note::Note;
pub use organization::Organization;
pub use role::{PermissionSet, Role};
pub use token::RefreshTokenRecord;
pub use user::User;
