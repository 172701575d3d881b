//! Note CRUD handlers, all scoped to the caller's organization.

use axum::extract::{Path, State};
use axum::Json;

use notehub_core::error::AppError;
use notehub_core::types::NoteId;
use notehub_entity::note::{NewNote, Note, NoteUpdate};

use crate::dto::request::{CreateNoteRequest, UpdateNoteRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::handlers::validated;
use crate::state::AppState;

/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<ApiResponse<Vec<Note>>>, ApiError> {
    let notes = state.notes.list_by_organization(claims.org.id).await?;
    Ok(Json(ApiResponse::ok(notes)))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let req = validated(req)?;

    let note = state
        .notes
        .create(&NewNote {
            organization_id: claims.org.id,
            author_id: claims.sub,
            title: req.title,
            content: req.content,
        })
        .await?;

    Ok(Json(ApiResponse::ok(note)))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<NoteId>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let note = state
        .notes
        .find_by_id(claims.org.id, id)
        .await?
        .ok_or_else(|| AppError::not_found("Note not found"))?;

    Ok(Json(ApiResponse::ok(note)))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<NoteId>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let req = validated(req)?;

    state
        .notes
        .find_by_id(claims.org.id, id)
        .await?
        .ok_or_else(|| AppError::not_found("Note not found"))?;

    let note = state
        .notes
        .update(
            claims.org.id,
            id,
            &NoteUpdate {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(note)))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<NoteId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let deleted = state.notes.delete(claims.org.id, id).await?;
    if !deleted {
        return Err(ApiError(AppError::not_found("Note not found")));
    }

    Ok(Json(ApiResponse::ok(MessageResponse::new("Note deleted"))))
}
