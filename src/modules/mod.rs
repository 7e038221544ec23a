//! Pluggable feature modules hosted by the server.

use std::sync::Arc;
use axum::Router;
use serde::Serialize;
use tracing::info;
use crate::accessor::Accessor;
use crate::config::FuzzgateConfig;
use crate::errors::FuzzgateError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

pub trait Module: Send + Sync {
    fn info(&self) -> ModuleInfo;

    /// HTTP routes, mounted by the host under `/api/modules/<name>`.
    fn router(self: Arc<Self>) -> Router;
}

/// Everything a module factory may draw on.
#[derive(Clone)]
pub struct ModuleContext {
    pub accessor: Arc<dyn Accessor>,
    pub config: FuzzgateConfig,
}

pub type ModuleFactory = fn(&ModuleContext) -> Result<Arc<dyn Module>, FuzzgateError>;

/// Ordered set of module factories, built explicitly by the host.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: Vec<(String, ModuleFactory)>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every module this crate ships.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(crate::fuzzer::MODULE_NAME, crate::fuzzer::factory);
        registry
    }

    /// Add a factory. A second registration under the same name replaces the first.
    pub fn register(&mut self, name: &str, factory: ModuleFactory) {
        self.factories.retain(|(n, _)| n != name);
        self.factories.push((name.to_string(), factory));
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn instantiate(&self, ctx: &ModuleContext) -> Result<Vec<Arc<dyn Module>>, FuzzgateError> {
        let mut modules = Vec::with_capacity(self.factories.len());
        for (name, factory) in &self.factories {
            let module = factory(ctx)?;
            info!(module = %name, version = %module.info().version, "Module loaded");
            modules.push(module);
        }
        Ok(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::DatabaseAccessor;
    use crate::config::DeploymentType;
    use crate::db::Database;

    struct Dummy;

    impl Module for Dummy {
        fn info(&self) -> ModuleInfo {
            ModuleInfo { name: "dummy".into(), description: "test".into(), version: "0.0.1".into() }
        }

        fn router(self: Arc<Self>) -> Router {
            Router::new()
        }
    }

    fn dummy_factory(_: &ModuleContext) -> Result<Arc<dyn Module>, FuzzgateError> {
        Ok(Arc::new(Dummy))
    }

    fn failing_factory(_: &ModuleContext) -> Result<Arc<dyn Module>, FuzzgateError> {
        Err(FuzzgateError::Config("broken".into()))
    }

    fn context() -> ModuleContext {
        let db = Database::in_memory().unwrap();
        let mut config = FuzzgateConfig::default();
        config.fuzzer.deployment_type = DeploymentType::Fake;
        ModuleContext { accessor: Arc::new(DatabaseAccessor::new(db, None)), config }
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ModuleRegistry::new();
        registry.register("dummy", failing_factory);
        registry.register("dummy", dummy_factory);
        assert_eq!(registry.names(), vec!["dummy"]);
        let modules = registry.instantiate(&context()).unwrap();
        assert_eq!(modules[0].info().name, "dummy");
    }

    #[test]
    fn test_factory_error_propagates() {
        let mut registry = ModuleRegistry::new();
        registry.register("broken", failing_factory);
        assert!(registry.instantiate(&context()).is_err());
    }

    #[test]
    fn test_builtin_contains_fuzzer() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(registry.names(), vec!["fuzzer"]);
        let modules = registry.instantiate(&context()).unwrap();
        assert_eq!(modules[0].info().name, "fuzzer");
    }
}
