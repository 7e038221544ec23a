use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use crate::api::AppState;
use crate::api::models::{ListQuery, RegisterApiRequest};
use crate::errors::FuzzgateError;
use crate::models::{Api, ApiId, ApiInfo};

pub async fn list_modules(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "modules": state.modules.as_slice(), "total": state.modules.len() }))
}

pub async fn register_api(
    State(state): State<AppState>,
    Json(req): Json<RegisterApiRequest>,
) -> Result<(StatusCode, Json<ApiInfo>), FuzzgateError> {
    if req.name.trim().is_empty() {
        return Err(FuzzgateError::InvalidParameter("API name must not be empty".into()));
    }
    let api = ApiInfo::from(req);
    state.db.upsert_api(&api)?;
    info!(api_id = api.id, target = %api.target_uri(), "API registered");
    Ok((StatusCode::CREATED, Json(api)))
}

pub async fn list_apis(State(state): State<AppState>) -> Result<Json<Value>, FuzzgateError> {
    let apis = state.db.list_apis()?;
    Ok(Json(json!({ "items": apis, "total": apis.len() })))
}

pub async fn get_api(
    State(state): State<AppState>,
    Path(id): Path<ApiId>,
) -> Result<Json<Value>, FuzzgateError> {
    let info = state
        .db
        .get_api(id)?
        .ok_or_else(|| FuzzgateError::NotFound(format!("API {} not found", id)))?;
    let fuzz = state.db.load_fuzz_state(id)?.unwrap_or_default();
    let target_uri = info.target_uri();

    let api = Api { info, in_fuzzing: fuzz.in_fuzzing, tests: fuzz.tests };
    let mut body = serde_json::to_value(&api)?;
    body["targetUri"] = json!(target_uri);
    Ok(Json(body))
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Path(id): Path<ApiId>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, FuzzgateError> {
    if state.db.get_api(id)?.is_none() {
        return Err(FuzzgateError::NotFound(format!("API {} not found", id)));
    }
    let items = state.db.list_notifications(id, query.limit.unwrap_or(50))?;
    Ok(Json(json!({ "items": items, "total": items.len() })))
}
