//! Role management handlers.

use axum::extract::{Path, State};
use axum::Json;

use notehub_core::error::AppError;
use notehub_core::types::RoleId;
use notehub_entity::role::Role;

use crate::dto::request::{CreateRoleRequest, UpdateRoleRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::handlers::validated;
use crate::state::AppState;

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<ApiResponse<Vec<Role>>>, ApiError> {
    let roles = state.roles.list_by_organization(claims.org.id).await?;
    Ok(Json(ApiResponse::ok(roles)))
}

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<CreateRoleRequest>,
) -> Result<Json<ApiResponse<Role>>, ApiError> {
    let req = validated(req)?;

    let role = state
        .roles
        .create(claims.org.id, &req.name, &req.permissions)
        .await?;

    Ok(Json(ApiResponse::ok(role)))
}

/// PUT /api/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<RoleId>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<Role>>, ApiError> {
    let req = validated(req)?;

    state
        .roles
        .find_by_id(claims.org.id, id)
        .await?
        .ok_or_else(|| AppError::not_found("Role not found"))?;

    let role = state
        .roles
        .update(claims.org.id, id, &req.name, &req.permissions)
        .await?;

    Ok(Json(ApiResponse::ok(role)))
}
