//! Note repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::{NoteId, OrgId};
use notehub_entity::note::{NewNote, Note, NoteUpdate};
use notehub_entity::store::NoteStore;

/// Repository for note CRUD, organization-scoped.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Create a new note repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for NoteRepository {
    async fn find_by_id(&self, org_id: OrgId, note_id: NoteId) -> AppResult<Option<Note>> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND organization_id = $2")
            .bind(note_id)
            .bind(org_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find note", e))
    }

    async fn list_by_organization(&self, org_id: OrgId) -> AppResult<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE organization_id = $1 ORDER BY created_at DESC",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notes", e))
    }

    async fn create(&self, note: &NewNote) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "INSERT INTO notes (organization_id, author_id, title, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(note.organization_id)
        .bind(note.author_id)
        .bind(&note.title)
        .bind(&note.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create note", e))
    }

    async fn update(&self, org_id: OrgId, note_id: NoteId, update: &NoteUpdate) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "UPDATE notes SET title = COALESCE($3, title), \
                              content = COALESCE($4, content), \
                              updated_at = NOW() \
             WHERE id = $1 AND organization_id = $2 RETURNING *",
        )
        .bind(note_id)
        .bind(org_id)
        .bind(&update.title)
        .bind(&update.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update note", e))?
        .ok_or_else(|| AppError::not_found(format!("Note {note_id} not found")))
    }

    async fn delete(&self, org_id: OrgId, note_id: NoteId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND organization_id = $2")
            .bind(note_id)
            .bind(org_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete note", e))?;
        Ok(result.rows_affected() > 0)
    }
}
