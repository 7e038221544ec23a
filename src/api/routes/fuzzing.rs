use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use crate::api::errors::parse_body;
use crate::api::models::{StartTestResponse, TestListResponse};
use crate::errors::FuzzgateError;
use crate::fuzzer::{Fuzzer, MODULE_VERSION};
use crate::models::{ApiFindings, ApiId, FuzzingInput, Report, ShortTestProgress, ShortTestReport, StatusUpdate, Test};

type FuzzerState = State<Arc<Fuzzer>>;

pub fn router(fuzzer: Arc<Fuzzer>) -> Router {
    Router::new()
        .route("/version", get(version))
        .route("/state", get(module_state))
        .route("/{api_id}/start", post(start_test))
        .route("/{api_id}/stop", post(stop_test))
        .route("/{api_id}/progress", get(get_progress))
        .route("/{api_id}/shortreport", get(get_short_report))
        .route("/{api_id}/status", get(get_status).post(receive_status))
        .route("/{api_id}/rawfindings", post(receive_findings))
        .route("/{api_id}/findings", get(get_findings))
        .route("/{api_id}/tests", get(list_tests))
        .route("/{api_id}/tests/{timestamp}", get(get_test))
        .with_state(fuzzer)
}

async fn version() -> Json<Value> {
    Json(json!({"version": MODULE_VERSION}))
}

async fn module_state(State(fuzzer): FuzzerState) -> Json<Value> {
    Json(fuzzer.state())
}

/// An empty body means no input was supplied.
async fn start_test(
    State(fuzzer): FuzzerState,
    Path(api_id): Path<ApiId>,
    body: Bytes,
) -> Result<Json<StartTestResponse>, FuzzgateError> {
    let input: Option<FuzzingInput> = if body.is_empty() { None } else { Some(parse_body(&body)?) };
    let timestamp = fuzzer.start(api_id, input).await?;
    Ok(Json(StartTestResponse { api_id, timestamp }))
}

async fn stop_test(State(fuzzer): FuzzerState, Path(api_id): Path<ApiId>) -> Result<StatusCode, FuzzgateError> {
    fuzzer.stop(api_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_progress(
    State(fuzzer): FuzzerState,
    Path(api_id): Path<ApiId>,
) -> Result<Json<ShortTestProgress>, FuzzgateError> {
    Ok(Json(fuzzer.get_progress(api_id).await?))
}

async fn get_short_report(
    State(fuzzer): FuzzerState,
    Path(api_id): Path<ApiId>,
) -> Result<Json<ShortTestReport>, FuzzgateError> {
    Ok(Json(fuzzer.get_short_report(api_id).await?))
}

async fn get_status(State(fuzzer): FuzzerState, Path(api_id): Path<ApiId>) -> Result<Json<Report>, FuzzgateError> {
    Ok(Json(fuzzer.get_last_report(api_id).await?))
}

async fn receive_status(
    State(fuzzer): FuzzerState,
    Path(api_id): Path<ApiId>,
    body: Bytes,
) -> Result<StatusCode, FuzzgateError> {
    let update: StatusUpdate = parse_body(&body)?;
    fuzzer.receive_status(api_id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn receive_findings(
    State(fuzzer): FuzzerState,
    Path(api_id): Path<ApiId>,
    body: Bytes,
) -> Result<StatusCode, FuzzgateError> {
    let payload: Value = parse_body(&body)?;
    fuzzer.store_findings(api_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_findings(
    State(fuzzer): FuzzerState,
    Path(api_id): Path<ApiId>,
) -> Result<Json<ApiFindings>, FuzzgateError> {
    Ok(Json(fuzzer.get_findings(api_id).await?))
}

async fn list_tests(
    State(fuzzer): FuzzerState,
    Path(api_id): Path<ApiId>,
) -> Result<Json<TestListResponse>, FuzzgateError> {
    let items = fuzzer.list_tests(api_id).await?;
    let total = items.len();
    Ok(Json(TestListResponse { items, total }))
}

async fn get_test(
    State(fuzzer): FuzzerState,
    Path((api_id, timestamp)): Path<(ApiId, i64)>,
) -> Result<Json<Test>, FuzzgateError> {
    Ok(Json(fuzzer.get_test(api_id, timestamp).await?))
}
