/**
 * Authentication Extractors
 *
 * Extractors for routes that require (or optionally use) an
 * authenticated user. Both read the `Authorization: Bearer <token>`
 * header and verify the JWT against the configured secret.
 *
 * `AuthUser` rejects with 401 when the token is missing or invalid;
 * `OptionalAuthUser` yields `None` instead, for endpoints that serve
 * anonymous visitors with reduced functionality.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::sessions::{verify_token, Claims};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user data extracted from the JWT token
#[derive(Clone, Debug)]
pub struct AuthUser(pub Claims);

/// Optionally authenticated user; `None` for anonymous requests
#[derive(Clone, Debug)]
pub struct OptionalAuthUser(pub Option<Claims>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            ApiError::unauthorized("Not authenticated")
        })?;

        let claims = verify_token(&state.settings, token).map_err(|e| {
            tracing::warn!("Invalid token: {e:?}");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser(claims))
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_token(parts)
            .and_then(|token| verify_token(&state.settings, token).ok());

        Ok(OptionalAuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic abc123"));
        assert_eq!(bearer_token(&parts), None);
    }
}
