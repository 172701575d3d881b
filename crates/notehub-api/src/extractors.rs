//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use notehub_auth::Claims;
use notehub_core::error::AppError;

use crate::error::ApiError;

/// The authenticated caller, extracted from request extensions.
///
/// The session-validation middleware inserts the decoded [`Claims`];
/// routes that skip that middleware have no identity and extraction
/// fails with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError(AppError::authentication("Authentication required")))
    }
}
