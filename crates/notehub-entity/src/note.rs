//! Note records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notehub_core::types::{NoteId, OrgId, UserId};

/// A note, scoped to one organization.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Primary key.
    pub id: NoteId,
    /// Owning organization.
    pub organization_id: OrgId,
    /// Authoring user.
    pub author_id: UserId,
    /// Title.
    pub title: String,
    /// Body content.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a note.
#[derive(Debug, Clone)]
pub struct NewNote {
    /// Owning organization.
    pub organization_id: OrgId,
    /// Authoring user.
    pub author_id: UserId,
    /// Title.
    pub title: String,
    /// Body content.
    pub content: String,
}

/// Partial note update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    /// New title, if changing.
    pub title: Option<String>,
    /// New content, if changing.
    pub content: Option<String>,
}
