pub mod auth;
pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;
use axum::{middleware, routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use crate::accessor::DatabaseAccessor;
use crate::config::FuzzgateConfig;
use crate::db::Database;
use crate::errors::FuzzgateError;
use crate::modules::{Module, ModuleContext, ModuleInfo, ModuleRegistry};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub modules: Arc<Vec<ModuleInfo>>,
}

/// Open the database and instantiate every registered module.
pub fn create_app(
    config: &FuzzgateConfig,
    registry: &ModuleRegistry,
) -> Result<(AppState, Vec<Arc<dyn Module>>), FuzzgateError> {
    let db = Database::new(&config.server.db)?;
    create_app_with_db(db, config, registry)
}

pub fn create_app_with_db(
    db: Database,
    config: &FuzzgateConfig,
    registry: &ModuleRegistry,
) -> Result<(AppState, Vec<Arc<dyn Module>>), FuzzgateError> {
    let accessor = Arc::new(DatabaseAccessor::new(db.clone(), config.notifications.url.clone()));
    let ctx = ModuleContext { accessor, config: config.clone() };
    let modules = registry.instantiate(&ctx)?;

    let state = AppState {
        db,
        modules: Arc::new(modules.iter().map(|m| m.info()).collect()),
    };
    Ok((state, modules))
}

pub fn build_router(state: AppState, modules: Vec<Arc<dyn Module>>) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/modules", get(routes::apis::list_modules))
        .route("/api/apis", post(routes::apis::register_api).get(routes::apis::list_apis))
        .route("/api/apis/{id}", get(routes::apis::get_api))
        .route("/api/apis/{id}/notifications", get(routes::apis::list_notifications))
        .with_state(state);

    for module in modules {
        let prefix = format!("/api/modules/{}", module.info().name);
        router = router.nest(&prefix, module.router());
    }

    router
        .layer(middleware::from_fn(auth::api_auth_middleware))
        .layer(TraceLayer::new_for_http())
}
