//! User identity records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notehub_core::types::{OrgId, RoleId, UserId};

/// A user account. One row per identity; never hard-deleted by handlers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Primary key.
    pub id: UserId,
    /// Unique login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Deterministic credential hash. Never serialized to clients.
    pub password_hash: String,
    /// Role reference, resolved per-request for permission checks.
    pub role_id: RoleId,
    /// Owning organization.
    pub organization_id: OrgId,
    /// Internal object-storage key for the avatar, if any.
    pub avatar_key: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Strips sensitive fields for client-facing payloads.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role_id: self.role_id,
            organization_id: self.organization_id,
            created_at: self.created_at,
        }
    }
}

/// Client-safe view of a user: no password hash, no internal avatar key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Primary key.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Role reference.
    pub role_id: RoleId,
    /// Owning organization.
    pub organization_id: OrgId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Pre-generated primary key (the credential hash salts on it).
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Already-hashed credential.
    pub password_hash: String,
    /// Role reference.
    pub role_id: RoleId,
    /// Owning organization.
    pub organization_id: OrgId,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New email, if changing.
    pub email: Option<String>,
    /// New display name, if changing.
    pub full_name: Option<String>,
    /// New role, if changing.
    pub role_id: Option<RoleId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_carries_no_credential_material() {
        let user = User {
            id: UserId::new(),
            email: "a@b.com".into(),
            full_name: "Ada".into(),
            password_hash: "deadbeef".into(),
            role_id: RoleId::new(),
            organization_id: OrgId::new(),
            avatar_key: Some("avatars/ada.png".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(user.to_profile()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("avatar_key").is_none());
        assert_eq!(json["email"], "a@b.com");
    }
}
