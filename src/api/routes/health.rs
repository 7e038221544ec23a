use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "fuzzgate",
        "version": env!("CARGO_PKG_VERSION"),
        "git_hash": env!("FUZZGATE_GIT_HASH"),
        "build_timestamp": env!("FUZZGATE_BUILD_TIMESTAMP"),
    }))
}
