use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::json;
use tracing::debug;

pub const API_TOKEN_ENV: &str = "FUZZGATE_API_TOKEN";

/// Liveness checks stay reachable without credentials.
const PUBLIC_PATHS: &[&str] = &["/api/health"];

pub async fn api_auth_middleware(
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let expected = std::env::var(API_TOKEN_ENV).unwrap_or_default();
    if expected.is_empty() || PUBLIC_PATHS.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => Ok(next.run(request).await),
        Some(_) => {
            debug!(path = %request.uri().path(), "Rejected request with invalid API token");
            Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid API token"}))))
        }
        None => Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Missing Authorization header"})))),
    }
}
