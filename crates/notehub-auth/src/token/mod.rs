//! JWT token claims, issuance, and verification.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::{Claims, Identity, OrgClaim};
pub use issuer::{TokenIssuer, TokenPair};
pub use verifier::TokenVerifier;
