//! Session-validation middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use notehub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying a bare access token. `Authorization: Bearer <...>` is
/// accepted as an equivalent.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// Validates the access token and attaches the decoded claims to the
/// request.
///
/// Rejections are uniform 401s: the client never learns whether the token
/// was missing, malformed, forged, or expired. Decode results are not
/// cached.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| AppError::authentication("Authentication required"))?;

    let claims = state
        .verifier
        .decode_access(&token)
        .ok_or_else(|| AppError::authentication("Invalid token"))?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(ACCESS_TOKEN_HEADER) {
        return value.to_str().ok().map(str::to_owned);
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn reads_the_dedicated_header() {
        let h = headers(&[("access-token", "abc")]);
        assert_eq!(extract_token(&h).as_deref(), Some("abc"));
    }

    #[test]
    fn strips_the_bearer_prefix() {
        let h = headers(&[("authorization", "Bearer abc")]);
        assert_eq!(extract_token(&h).as_deref(), Some("abc"));
    }

    #[test]
    fn dedicated_header_wins_when_both_are_present() {
        let h = headers(&[("access-token", "abc"), ("authorization", "Bearer xyz")]);
        assert_eq!(extract_token(&h).as_deref(), Some("abc"));
    }

    #[test]
    fn missing_or_unprefixed_authorization_yields_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        let h = headers(&[("authorization", "Basic abc")]);
        assert_eq!(extract_token(&h), None);
    }
}
