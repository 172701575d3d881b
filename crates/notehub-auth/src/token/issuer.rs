//! JWT token creation and refresh-token persistence.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::TokenId;
use notehub_entity::store::RefreshTokenStore;
use notehub_entity::token::RefreshTokenRecord;

use super::claims::{Claims, Identity};

/// An issued access + refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived stateless access token.
    pub access_token: String,
    /// Longer-lived refresh token, persisted server-side.
    pub refresh_token: String,
}

/// Creates signed access and refresh tokens.
///
/// Access tokens are stateless. Refresh tokens are durably recorded in
/// the [`RefreshTokenStore`] before being returned, so every outstanding
/// refresh token is revocable.
#[derive(Clone)]
pub struct TokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
    store: Arc<dyn RefreshTokenStore>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Create an issuer from the two signing secrets and TTLs.
    ///
    /// Refuses empty secrets rather than signing with a blank key.
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl_minutes: u64,
        refresh_ttl_days: u64,
        store: Arc<dyn RefreshTokenStore>,
    ) -> AppResult<Self> {
        if access_secret.is_empty() || refresh_secret.is_empty() {
            return Err(AppError::configuration(
                "Token signing secrets are not configured",
            ));
        }

        Ok(Self {
            access_key: EncodingKey::from_secret(access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(refresh_secret.as_bytes()),
            access_ttl: chrono::Duration::minutes(access_ttl_minutes as i64),
            refresh_ttl: chrono::Duration::days(refresh_ttl_days as i64),
            store,
        })
    }

    /// Sign a stateless access token for the identity.
    pub fn issue_access_token(&self, identity: &Identity) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.user_id,
            email: identity.email.clone(),
            role_id: identity.role_id,
            org: identity.org.clone(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            token_id: None,
        };

        encode(&Header::default(), &claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to sign access token: {e}")))
    }

    /// Sign a refresh token and durably record it.
    ///
    /// A fresh random token id is minted unless `existing_id` is supplied
    /// (rotation: the id stays stable across rotations for one login, so
    /// the upsert supersedes the previous token value under the same
    /// key). If the store write fails, no token is returned; an
    /// unrecorded refresh token would be unrevokable.
    pub async fn issue_refresh_token(
        &self,
        identity: &Identity,
        existing_id: Option<TokenId>,
    ) -> AppResult<String> {
        let token_id = existing_id.unwrap_or_default();
        let now = Utc::now();
        let expires_at = now + self.refresh_ttl;

        let claims = Claims {
            sub: identity.user_id,
            email: identity.email.clone(),
            role_id: identity.role_id,
            org: identity.org.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            token_id: Some(token_id),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to sign refresh token: {e}")))?;

        self.store
            .put(&RefreshTokenRecord {
                id: token_id,
                user_id: identity.user_id,
                token: token.clone(),
                expires_at,
            })
            .await?;

        Ok(token)
    }

    /// Issue an access + refresh pair.
    ///
    /// The access token is signed before the refresh record is written,
    /// so an unsignable claim set never leaves an orphaned record behind.
    pub async fn issue_token_pair(
        &self,
        identity: &Identity,
        rotate_from: Option<TokenId>,
    ) -> AppResult<TokenPair> {
        let access_token = self.issue_access_token(identity)?;
        let refresh_token = self.issue_refresh_token(identity, rotate_from).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
