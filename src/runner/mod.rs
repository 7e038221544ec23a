//! Out-of-process job runners that actually execute fuzzing jobs.

pub mod docker;
pub mod fake;

use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use crate::config::{DeploymentType, FuzzerConfig};
use crate::errors::FuzzgateError;
use crate::models::ApiId;

pub use docker::DockerClient;
pub use fake::{FakeClient, RunnerCall};

#[async_trait]
pub trait JobClient: Send + Sync {
    /// Launch a fuzzing job against `target_uri`. Returns once the job is
    /// scheduled, not when it finishes. `specs_info` is handed to the job as is.
    async fn trigger_job(
        &self,
        api_id: ApiId,
        target_uri: &str,
        auth_material: &str,
        time_budget: Duration,
        specs_info: Option<&serde_json::Value>,
    ) -> Result<(), FuzzgateError>;

    async fn stop_job(&self, api_id: ApiId) -> Result<(), FuzzgateError>;

    /// Deployment name for logging
    fn deployment_name(&self) -> &str;
}

/// Build the job client for the configured deployment type.
pub fn new_client(config: &FuzzerConfig) -> Result<Arc<dyn JobClient>, FuzzgateError> {
    match config.deployment_type {
        DeploymentType::Docker => Ok(Arc::new(DockerClient::new(
            &config.docker,
            config.platform_host.clone(),
        )?)),
        DeploymentType::Fake => Ok(Arc::new(FakeClient::new())),
        DeploymentType::Kubernetes => Err(FuzzgateError::NotSupported(
            "Kubernetes job runner is not available in this build".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_new_client_fake() {
        let config = FuzzerConfig { deployment_type: DeploymentType::Fake, ..Default::default() };
        let client = new_client(&config).unwrap();
        assert_eq!(client.deployment_name(), "fake");
    }

    #[test]
    fn test_new_client_kubernetes_not_supported() {
        let config = FuzzerConfig { deployment_type: DeploymentType::Kubernetes, ..Default::default() };
        let err = new_client(&config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotSupported);
    }
}
