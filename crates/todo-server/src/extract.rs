//! Request context extraction.
//!
//! The caller's token is read from `Authorization: Bearer <token>` or, when
//! that header is absent, from `x-auth-token`. The token is carried as opaque
//! context: it is never validated and a missing token is never rejected.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use http::header::AUTHORIZATION;

/// Fallback header carrying a raw token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Opaque per-request context handed to handlers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    /// Build a context from an optional token.
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Read the token from request headers.
    pub fn from_headers(headers: &http::HeaderMap) -> Self {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);

        let token = bearer
            .or_else(|| {
                headers
                    .get(AUTH_TOKEN_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .map(str::trim)
            })
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self { token }
    }

    /// The raw token, if the caller sent one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether the caller sent a token.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

// The token itself is never logged.
impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("has_token", &self.has_token())
            .finish()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
