//! Persisted refresh-token records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notehub_core::types::{TokenId, UserId};

/// A persisted refresh token.
///
/// The `(id, user_id)` pair is the composite key; an upsert keeps exactly
/// one live record per pair. The record is the sole authority on whether
/// a refresh token is still honorable: a cryptographically valid token
/// whose record is gone (logout) or whose stored `token` string differs
/// (superseded by rotation) is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    /// Token identifier embedded in the signed refresh token.
    pub id: TokenId,
    /// Owning user.
    pub user_id: UserId,
    /// The signed refresh token string currently honored for this id.
    pub token: String,
    /// Absolute expiry of the record.
    pub expires_at: DateTime<Utc>,
}
