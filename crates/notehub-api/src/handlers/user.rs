//! User handlers: registration, profile, directory, password change.

use axum::extract::{Path, State};
use axum::Json;

use notehub_core::error::AppError;
use notehub_core::types::UserId;
use notehub_entity::user::{UserProfile, UserUpdate};

use crate::dto::request::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::handlers::validated;
use crate::state::AppState;

/// POST /api/user/create (public)
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let req = validated(req)?;

    let profile = state
        .auth
        .register_user(
            &req.email,
            &req.password,
            &req.full_name,
            req.organization_id,
            req.role_id,
        )
        .await?;

    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/users
///
/// Lists the caller's organization only.
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, ApiError> {
    let users = state.users.list_by_organization(claims.org.id).await?;
    let profiles = users.iter().map(|u| u.to_profile()).collect();

    Ok(Json(ApiResponse::ok(profiles)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let user = fetch_in_org(&state, claims.org.id, id).await?;
    Ok(Json(ApiResponse::ok(user.to_profile())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let req = validated(req)?;
    fetch_in_org(&state, claims.org.id, id).await?;

    let updated = state
        .users
        .update(
            id,
            &UserUpdate {
                email: req.email,
                full_name: req.full_name,
                role_id: req.role_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(updated.to_profile())))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ApiResponse::ok(user.to_profile())))
}

/// PUT /api/users/password/change (self-service)
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let req = validated(req)?;

    state
        .auth
        .change_password(claims.sub, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed",
    ))))
}

/// Cross-organization ids answer 404, same as a missing row.
async fn fetch_in_org(
    state: &AppState,
    org_id: notehub_core::types::OrgId,
    id: UserId,
) -> Result<notehub_entity::user::User, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .filter(|u| u.organization_id == org_id)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(user)
}
