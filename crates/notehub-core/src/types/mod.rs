//! Shared typed values used across NoteHub crates.

pub mod id;

pub use id::{NoteId, OrgId, RoleId, TokenId, UserId};
