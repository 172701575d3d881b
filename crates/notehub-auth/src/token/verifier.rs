//! JWT token verification.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use super::claims::Claims;

/// Verifies signed tokens.
///
/// Every decode resolves to `Option<Claims>`: any failure (bad
/// signature, malformed token, expiry) yields `None`. Callers never
/// learn which, and map `None` to a generic unauthorized response.
#[derive(Clone)]
pub struct TokenVerifier {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish()
    }
}

impl TokenVerifier {
    /// Create a verifier from the two signing secrets.
    pub fn new(access_secret: &str, refresh_secret: &str) -> AppResult<Self> {
        if access_secret.is_empty() || refresh_secret.is_empty() {
            return Err(AppError::configuration(
                "Token signing secrets are not configured",
            ));
        }

        // Expiry is checked explicitly against the wall clock after
        // decode, not delegated to the library.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Ok(Self {
            access_key: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(refresh_secret.as_bytes()),
            validation,
        })
    }

    /// Decode and verify an access token.
    pub fn decode_access(&self, token: &str) -> Option<Claims> {
        self.decode(token, &self.access_key)
    }

    /// Decode and verify a refresh token. Requires the embedded persisted
    /// token id; a refresh token without one is rejected.
    pub fn decode_refresh(&self, token: &str) -> Option<Claims> {
        let claims = self.decode(token, &self.refresh_key)?;
        claims.token_id?;
        Some(claims)
    }

    fn decode(&self, token: &str, key: &DecodingKey) -> Option<Claims> {
        let data = decode::<Claims>(token, key, &self.validation).ok()?;
        if data.claims.is_expired() {
            return None;
        }
        Some(data.claims)
    }
}
