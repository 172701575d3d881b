//! Organization (tenant) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notehub_core::types::OrgId;

/// A tenant. Roles and notes are scoped to exactly one organization.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Primary key.
    pub id: OrgId,
    /// Display name.
    pub name: String,
    /// Free-form tenant settings. Stripped from token claims before
    /// signing; settings may hold integration credentials.
    pub settings: sqlx::types::Json<serde_json::Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
