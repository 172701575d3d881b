//! HTTP request handlers, organized by domain.

pub mod auth;
pub mod health;
pub mod note;
pub mod role;
pub mod user;

use notehub_core::error::AppError;
use validator::Validate;

use crate::error::ApiError;

/// Runs DTO validation, mapping failures to a 400 response.
pub(crate) fn validated<T: Validate>(dto: T) -> Result<T, ApiError> {
    dto.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;
    Ok(dto)
}
