//! HTTP Basic authentication for the write path.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose, Engine as _};

use crate::http::response::ApiError;

/// Realm advertised in `WWW-Authenticate` challenges.
pub const REALM: &str = "drive-redirector";

/// A username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Extract credentials from an `Authorization: Basic ...` header.
    ///
    /// Returns `None` when the header is missing, uses another scheme, or
    /// does not decode to `user:password`.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self::new(username, password))
    }

    /// Value for an `Authorization` header carrying these credentials.
    pub fn to_header_value(&self) -> String {
        let encoded = general_purpose::STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {encoded}")
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Middleware that only lets requests with the configured credentials through.
pub async fn basic_auth_middleware(
    State(expected): State<Arc<Credentials>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match Credentials::from_headers(request.headers()) {
        Some(provided) if provided == *expected => next.run(request).await,
        Some(provided) => {
            tracing::warn!(username = %provided.username, "Rejected credentials");
            unauthorized()
        }
        None => {
            tracing::debug!("Missing or malformed basic auth header");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    let mut response = ApiError::Unauthorized.into_response();
    if let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{REALM}\"")) {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, challenge);
    }
    response
}
