//! JWT claims embedded in access and refresh tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use notehub_core::types::{OrgId, RoleId, TokenId, UserId};
use notehub_entity::organization::Organization;
use notehub_entity::user::User;

/// Organization snapshot carried in token claims.
///
/// Only the id and name are embedded; tenant settings are stripped before
/// signing since they may hold integration credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgClaim {
    /// Organization id.
    pub id: OrgId,
    /// Organization display name.
    pub name: String,
}

impl From<&Organization> for OrgClaim {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id,
            name: org.name.clone(),
        }
    }
}

/// The identity snapshot a token is issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// User id.
    pub user_id: UserId,
    /// User email.
    pub email: String,
    /// Role reference at issuance time.
    pub role_id: RoleId,
    /// Organization snapshot.
    pub org: OrgClaim,
}

impl Identity {
    /// Build an identity snapshot from a user and their organization.
    pub fn for_user(user: &User, org: &Organization) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role_id: user.role_id,
            org: OrgClaim::from(org),
        }
    }
}

/// JWT claims payload. Never persisted; validity is cryptographic plus an
/// explicit expiry check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id.
    pub sub: UserId,
    /// User email.
    pub email: String,
    /// Role reference at issuance time.
    pub role_id: RoleId,
    /// Organization snapshot.
    pub org: OrgClaim,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Persisted token id. Present only in refresh tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<TokenId>,
}

impl Claims {
    /// Returns the identity snapshot these claims describe.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub,
            email: self.email.clone(),
            role_id: self.role_id,
            org: self.org.clone(),
        }
    }

    /// Checks wall-clock expiry. Callers must reject expired claims even
    /// when the signature verified.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
