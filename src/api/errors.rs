use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;
use crate::errors::{ErrorKind, FuzzgateError};

impl IntoResponse for FuzzgateError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidParameter | ErrorKind::NotSupported => StatusCode::BAD_REQUEST,
            ErrorKind::PluginError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

/// Decode a JSON request body, reporting malformed input as an invalid parameter.
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, FuzzgateError> {
    serde_json::from_slice(body)
        .map_err(|e| FuzzgateError::InvalidParameter(format!("Malformed request body: {}", e)))
}
