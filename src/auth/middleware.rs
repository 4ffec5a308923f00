//! Authentication gate
//!
//! Extracts the bearer token, verifies it and attaches the decoded identity
//! to the request. Requests without credentials are rejected with 401;
//! requests with invalid or expired credentials with 403. The reason for a
//! rejection is logged server-side but not exposed to the caller.

use crate::{auth::jwt::TokenService, error::AppError, models::user::Role};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Decoded identity attached to authenticated requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i32,
    pub role: Role,
}

// Lets handlers take AuthContext as an extractor
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .ok_or(AppError::Unauthenticated)
}

/// Middleware guarding protected routes
pub async fn require_auth(
    State(token_service): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;

    let claims = token_service.verify_access(&token).map_err(|rejection| {
        tracing::warn!(reason = %rejection, "Bearer token rejected");
        AppError::Forbidden
    })?;

    let user_id = claims.subject_id().map_err(|rejection| {
        tracing::warn!(reason = %rejection, "Bearer token rejected");
        AppError::Forbidden
    })?;

    req.extensions_mut().insert(AuthContext { user_id, role: claims.role });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        let token = extract_token(&headers).unwrap();
        assert_eq!(token, "test_token_123");
    }

    #[test]
    fn test_extract_token_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(extract_token(&headers), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_extract_token_without_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());

        assert!(matches!(extract_token(&headers), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_extract_token_empty_after_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer ".parse().unwrap());

        assert!(matches!(extract_token(&headers), Err(AppError::Unauthenticated)));
    }
}
