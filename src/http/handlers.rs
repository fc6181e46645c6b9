//! Request handlers for the redirect endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Body of `PUT /{file_id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRequest {
    pub new_file_id: String,
}

/// `GET /`: permanent redirect to the current file.
pub async fn get_redirect(State(state): State<AppState>) -> Response {
    let target = state.resource.read();
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Redirect::permanent(target.as_str()),
    )
        .into_response()
}

/// `PUT /{file_id}`: repoint the redirect. Runs behind basic auth.
pub async fn put_file_id(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    body: Bytes,
) -> Result<String, ApiError> {
    let request = if body.is_empty() {
        UpdateRequest::default()
    } else {
        serde_json::from_slice::<UpdateRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))?
    };

    let target = state.resource.write(&file_id, &request.new_file_id)?;
    Ok(target.into_string())
}
