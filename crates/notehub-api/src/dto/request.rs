//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use notehub_core::types::{OrgId, RoleId};
use notehub_entity::role::PermissionSet;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body for logout and token refresh: the refresh token under scrutiny.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create user request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login email.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    /// Owning organization.
    pub organization_id: OrgId,
    /// Role to assign.
    pub role_id: RoleId,
}

/// Update user request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New email, if changing.
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    /// New display name, if changing.
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    /// New role, if changing.
    pub role_id: Option<RoleId>,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Create note request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNoteRequest {
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Body content.
    pub content: String,
}

/// Update note request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    /// New title, if changing.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    /// New content, if changing.
    pub content: Option<String>,
}

/// Create role request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Role name, unique within the organization.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Permission flags, `resource -> action -> bool`.
    pub permissions: PermissionSet,
}

/// Update role request. Full replacement of name and permissions.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// Role name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Permission flags.
    pub permissions: PermissionSet,
}
