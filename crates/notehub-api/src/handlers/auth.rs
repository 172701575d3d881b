//! Auth handlers: login, logout, token refresh.

use axum::extract::State;
use axum::Json;

use notehub_auth::{LoginResult, TokenPair};
use notehub_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::handlers::validated;
use crate::state::AppState;

/// POST /api/login
///
/// Failed credentials answer one uniform 400; unknown email and wrong
/// password are indistinguishable. Success nests the token pair under
/// `token` beside the client-safe profile.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    let req = validated(req)?;

    match state.auth.login(&req.email, &req.password).await? {
        Some(result) => Ok(Json(ApiResponse::ok(result))),
        None => Err(AppError::validation("Incorrect username or password").into()),
    }
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auth.logout(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// POST /api/refresh/token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    let pair = state.auth.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(pair)))
}
