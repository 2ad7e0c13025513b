//! Credential extraction.
//!
//! The adapter forwards the caller's own access token to the source. It is
//! read from `Authorization: Bearer <token>`, or from `X-PLM-Access-Token`
//! for clients that cannot set `Authorization`.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;
use crate::source::Credential;

pub const ACCESS_TOKEN_HEADER: &str = "x-plm-access-token";

// ---------------------------------------------------------------------------
// Auth errors
// ---------------------------------------------------------------------------

/// A missing or unusable credential; maps to HTTP 401.
#[derive(Debug)]
pub struct AuthError(pub String);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("unauthorized", self.0.clone());
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// RequireCredential extractor
// ---------------------------------------------------------------------------

/// Axum extractor yielding the request's [`Credential`]; 401 when absent.
pub struct RequireCredential(pub Credential);

impl<S> FromRequestParts<S> for RequireCredential
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        credential_from_parts(parts)
            .map(RequireCredential)
            .ok_or_else(|| AuthError("missing access token".into()))
    }
}

fn credential_from_parts(parts: &Parts) -> Option<Credential> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let (scheme, token) = v.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then_some(token.trim())
        });
    let token = bearer.or_else(|| {
        parts
            .headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    })?;
    if token.is_empty() {
        return None;
    }
    Some(Credential::bearer(token))
}
