//! # notehub-auth
//!
//! The authentication core: deterministic credential hashing, signed
//! access/refresh token issuance and verification, and the login/logout/
//! refresh session lifecycle.

pub mod password;
pub mod service;
pub mod token;

pub use password::CredentialHasher;
pub use service::{AuthService, LoginResult};
pub use token::{Claims, Identity, OrgClaim, TokenIssuer, TokenPair, TokenVerifier};
