//! Roles and the capability map they carry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notehub_core::types::{OrgId, RoleId};

/// Nested permission flags keyed by `resource -> action`.
///
/// Capability strings take the `resource.action` form (`"notes.write"`).
/// A missing resource or action is simply "not permitted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(pub HashMap<String, HashMap<String, bool>>);

impl PermissionSet {
    /// Checks a single `resource.action` capability.
    pub fn allows(&self, capability: &str) -> bool {
        let Some((resource, action)) = capability.split_once('.') else {
            return false;
        };
        self.0
            .get(resource)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(false)
    }

    /// Checks that **every** capability in the list is granted.
    pub fn allows_all<'a, I>(&self, capabilities: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        capabilities.into_iter().all(|c| self.allows(c))
    }
}

/// A named permission set owned by one organization.
///
/// Users reference roles by id; the role is re-resolved on every
/// permission check so edits take effect without re-login.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    /// Primary key.
    pub id: RoleId,
    /// Owning organization.
    pub organization_id: OrgId,
    /// Role name, unique within the organization.
    pub name: String,
    /// Permission flags.
    #[sqlx(json)]
    pub permissions: PermissionSet,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_role() -> PermissionSet {
        serde_json::from_value(serde_json::json!({
            "settings": { "read": true, "write": false }
        }))
        .unwrap()
    }

    #[test]
    fn allows_granted_action() {
        assert!(settings_role().allows("settings.read"));
    }

    #[test]
    fn rejects_denied_action() {
        assert!(!settings_role().allows("settings.write"));
    }

    #[test]
    fn missing_resource_is_not_permitted() {
        assert!(!settings_role().allows("notes.read"));
        assert!(!settings_role().allows("settings.delete"));
    }

    #[test]
    fn malformed_capability_is_not_permitted() {
        assert!(!settings_role().allows("settings"));
        assert!(!settings_role().allows(""));
    }

    #[test]
    fn allows_all_is_all_or_nothing() {
        let role = settings_role();
        assert!(role.allows_all(["settings.read"]));
        assert!(!role.allows_all(["settings.write"]));
        assert!(!role.allows_all(["settings.read", "settings.write"]));
    }
}
