//! Error responses.
//!
//! # Responsibilities
//! - Map subsystem errors to HTTP status codes
//! - Keep error bodies plain text, matching the success body
//!
//! # Design Decisions
//! - Validation failures are client errors (400)
//! - Persistence failures are server errors (500) and carry the detail

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::redirect::RedirectError;

/// Error returned by request handlers and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RedirectError> for ApiError {
    fn from(err: RedirectError) -> Self {
        match &err {
            RedirectError::Validation(reason) => ApiError::BadRequest(reason.to_string()),
            RedirectError::Persistence { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::EnvError;

    #[test]
    fn test_redirect_errors_map_to_status() {
        let bad: ApiError = RedirectError::Validation("nope").into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let internal: ApiError = RedirectError::Persistence {
            source: EnvError::ReadOnly { key: "FILE_ID".into() },
        }
        .into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(internal.to_string().contains("FILE_ID"));
    }
}
