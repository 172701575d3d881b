//! Concrete PostgreSQL repositories implementing the store traits.

pub mod note;
pub mod organization;
pub mod refresh_token;
pub mod role;
pub mod user;

pub use note::NoteRepository;
pub use organization::OrganizationRepository;
pub use refresh_token::RefreshTokenRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
