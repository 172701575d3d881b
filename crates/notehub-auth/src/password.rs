//! Deterministic salted credential hashing.

use sha2::{Digest, Sha256};

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::UserId;

/// Hashes credentials as `SHA-256(user_id + secret + password)`, hex
/// encoded.
///
/// Deterministic: the user id and the static server secret are the only
/// salt, so equality against the stored hash is an exact string compare.
/// Matches the hash format already present in production user records.
#[derive(Clone)]
pub struct CredentialHasher {
    secret: String,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher").finish()
    }
}

impl CredentialHasher {
    /// Create a hasher from the static password secret.
    ///
    /// Refuses an empty secret: hashing without the server secret would
    /// silently produce weaker, incompatible hashes.
    pub fn new(secret: impl Into<String>) -> AppResult<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AppError::configuration(
                "Password hash secret is not configured",
            ));
        }
        Ok(Self { secret })
    }

    /// Hash a raw password for the given user.
    pub fn hash(&self, user_id: UserId, raw_password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(user_id.to_string().as_bytes());
        hasher.update(self.secret.as_bytes());
        hasher.update(raw_password.as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Check a raw password against a stored hash.
    pub fn verify(&self, user_id: UserId, raw_password: &str, stored_hash: &str) -> bool {
        self.hash(user_id, raw_password) == stored_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_inputs() {
        let hasher = CredentialHasher::new("server-secret").unwrap();
        let id = UserId::new();
        assert_eq!(hasher.hash(id, "secret123"), hasher.hash(id, "secret123"));
    }

    #[test]
    fn differs_per_user_and_password() {
        let hasher = CredentialHasher::new("server-secret").unwrap();
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(hasher.hash(a, "secret123"), hasher.hash(b, "secret123"));
        assert_ne!(hasher.hash(a, "secret123"), hasher.hash(a, "secret124"));
    }

    #[test]
    fn output_is_hex_sha256() {
        let hasher = CredentialHasher::new("server-secret").unwrap();
        let hash = hasher.hash(UserId::new(), "pw");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(CredentialHasher::new("").is_err());
    }

    #[test]
    fn verify_matches_hash() {
        let hasher = CredentialHasher::new("server-secret").unwrap();
        let id = UserId::new();
        let stored = hasher.hash(id, "secret123");
        assert!(hasher.verify(id, "secret123", &stored));
        assert!(!hasher.verify(id, "wrong", &stored));
    }
}
