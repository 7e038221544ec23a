//! The fuzzer module: lifecycle control, webhook ingestion and queries for
//! fuzzing sessions run by an out-of-process job runner.

pub mod controller;
pub mod queries;
pub mod webhook;

use std::sync::Arc;
use axum::Router;
use tracing::{error, info};
use crate::accessor::Accessor;
use crate::errors::FuzzgateError;
use crate::models::{ApiId, ApiInfo};
use crate::modules::{Module, ModuleContext, ModuleInfo};
use crate::reporting::NotificationDispatcher;
use crate::runner::{self, JobClient};
use crate::session::SessionStore;

pub const MODULE_NAME: &str = "fuzzer";
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MODULE_DESCRIPTION: &str = "Active fuzz testing of discovered API endpoints";

pub struct Fuzzer {
    accessor: Arc<dyn Accessor>,
    client: Option<Arc<dyn JobClient>>,
    sessions: SessionStore,
    dispatcher: NotificationDispatcher,
}

impl Fuzzer {
    /// A fuzzer without a client still answers queries and webhooks; start
    /// and stop fail with a plugin error.
    pub fn new(accessor: Arc<dyn Accessor>, client: Option<Arc<dyn JobClient>>) -> Self {
        Self {
            sessions: SessionStore::new(accessor.clone()),
            dispatcher: NotificationDispatcher::new(accessor.clone(), MODULE_NAME),
            accessor,
            client,
        }
    }

    fn client(&self) -> Result<Arc<dyn JobClient>, FuzzgateError> {
        self.client
            .clone()
            .ok_or_else(|| FuzzgateError::Plugin("No deployment client running".into()))
    }

    async fn resolve_api(&self, api_id: ApiId) -> Result<ApiInfo, FuzzgateError> {
        self.accessor
            .get_api(api_id)
            .await
            .map_err(FuzzgateError::into_plugin)?
            .ok_or_else(|| FuzzgateError::NotFound(format!("API {} not found", api_id)))
    }
}

/// Module factory: builds the job client for the configured deployment.
/// A client that cannot be built leaves the module running without one.
pub fn factory(ctx: &ModuleContext) -> Result<Arc<dyn Module>, FuzzgateError> {
    let deployment = ctx.config.fuzzer.deployment_type;
    let client = match runner::new_client(&ctx.config.fuzzer) {
        Ok(client) => {
            info!(deployment = %client.deployment_name(), "Fuzzing job client ready");
            Some(client)
        }
        Err(e) => {
            error!(deployment = %deployment, error = %e, "Failed to create fuzzing job client");
            None
        }
    };
    Ok(Arc::new(Fuzzer::new(ctx.accessor.clone(), client)))
}

impl Module for Fuzzer {
    fn info(&self) -> ModuleInfo {
        ModuleInfo {
            name: MODULE_NAME.to_string(),
            description: MODULE_DESCRIPTION.to_string(),
            version: MODULE_VERSION.to_string(),
        }
    }

    fn router(self: Arc<Self>) -> Router {
        crate::api::routes::fuzzing::router(self)
    }
}
