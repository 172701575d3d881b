//! Permission-evaluation middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use notehub_auth::Claims;
use notehub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Checks that the authenticated caller's role grants every capability in
/// `required`.
///
/// Capabilities take the `resource.action` form. The role is re-resolved
/// through the [`RoleStore`](notehub_entity::store::RoleStore) on every
/// request, so permission edits take effect immediately without re-login.
/// A role id that no longer resolves is a stale-claims client error (400),
/// not an authentication failure.
pub async fn require_capabilities(
    State(state): State<AppState>,
    required: &'static [&'static str],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::authentication("Authentication required"))?;

    let role = state
        .roles
        .find_by_id(claims.org.id, claims.role_id)
        .await?
        .ok_or_else(|| AppError::validation("Unknown role"))?;

    if !role.permissions.allows_all(required.iter().copied()) {
        debug!(
            user_id = %claims.sub,
            role = %role.name,
            required = ?required,
            "permission denied"
        );
        return Err(ApiError(AppError::authorization("Insufficient permissions")));
    }

    Ok(next.run(request).await)
}
