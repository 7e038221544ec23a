use bollard::Docker;
use bollard::container::{
    Config, CreateContainerOptions, RemoveContainerOptions, StartContainerOptions, StopContainerOptions,
};
use bollard::models::HostConfig;
use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use crate::config::DockerConfig;
use crate::errors::FuzzgateError;
use crate::models::ApiId;
use super::JobClient;
use tracing::{info, warn};

/// Runs one fuzzer container per API on the local Docker daemon.
pub struct DockerClient {
    docker: Docker,
    image: String,
    network_mode: String,
    container_prefix: String,
    platform_host: Option<String>,
}

impl DockerClient {
    pub fn new(config: &DockerConfig, platform_host: Option<String>) -> Result<Self, FuzzgateError> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| FuzzgateError::Runner(format!("Failed to connect to Docker: {}", e)))?;

        Ok(Self {
            docker,
            image: config.image.clone(),
            network_mode: config.network_mode.clone(),
            container_prefix: config.container_prefix.clone(),
            platform_host,
        })
    }

    pub fn container_name(&self, api_id: ApiId) -> String {
        format!("{}-{}", self.container_prefix, api_id)
    }

    fn job_env(
        &self,
        api_id: ApiId,
        target_uri: &str,
        auth_material: &str,
        time_budget: Duration,
        specs_info: Option<&serde_json::Value>,
    ) -> Vec<String> {
        let mut env = vec![
            format!("API_ID={}", api_id),
            format!("TARGET_URI={}", target_uri),
            format!("TIME_BUDGET_SECS={}", time_budget.as_secs()),
        ];
        if !auth_material.is_empty() {
            env.push(format!("AUTH={}", auth_material));
        }
        if let Some(specs) = specs_info {
            env.push(format!("SPECS_INFO={}", specs));
        }
        if let Some(host) = &self.platform_host {
            env.push(format!("PLATFORM_HOST={}", host));
        }
        env
    }

    /// Drop a leftover container from a previous job for the same API.
    async fn remove_stale(&self, name: &str) {
        let result = self
            .docker
            .remove_container(name, Some(RemoveContainerOptions { force: true, ..Default::default() }))
            .await;
        if let Err(e) = result {
            if !is_not_found(&e) {
                warn!(container = %name, error = %e, "Failed to remove stale fuzzer container");
            }
        }
    }
}

fn is_not_found(err: &bollard::errors::Error) -> bool {
    matches!(err, bollard::errors::Error::DockerResponseServerError { status_code: 404, .. })
}

#[async_trait]
impl JobClient for DockerClient {
    async fn trigger_job(
        &self,
        api_id: ApiId,
        target_uri: &str,
        auth_material: &str,
        time_budget: Duration,
        specs_info: Option<&serde_json::Value>,
    ) -> Result<(), FuzzgateError> {
        let name = self.container_name(api_id);
        self.remove_stale(&name).await;

        let host_config = HostConfig {
            network_mode: Some(self.network_mode.clone()),
            ..Default::default()
        };

        let mut labels = HashMap::new();
        labels.insert("fuzzgate.api-id".to_string(), api_id.to_string());

        let config = Config {
            image: Some(self.image.clone()),
            env: Some(self.job_env(api_id, target_uri, auth_material, time_budget, specs_info)),
            labels: Some(labels),
            host_config: Some(host_config),
            ..Default::default()
        };

        let options = CreateContainerOptions {
            name: name.as_str(),
            platform: None,
        };

        self.docker.create_container(Some(options), config).await
            .map_err(|e| FuzzgateError::Runner(format!("Failed to create fuzzer container: {}", e)))?;

        self.docker
            .start_container(&name, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| FuzzgateError::Runner(format!("Failed to start fuzzer container: {}", e)))?;

        info!(container = %name, api_id, target = %target_uri, "Fuzzer container started");
        Ok(())
    }

    async fn stop_job(&self, api_id: ApiId) -> Result<(), FuzzgateError> {
        let name = self.container_name(api_id);

        match self.docker.stop_container(&name, Some(StopContainerOptions { t: 10 })).await {
            Ok(()) => info!(container = %name, "Fuzzer container stopped"),
            // Already exited on its own.
            Err(bollard::errors::Error::DockerResponseServerError { status_code: 304, .. }) => {}
            Err(e) if is_not_found(&e) => {
                return Err(FuzzgateError::Runner(format!("No fuzzer container for API {}", api_id)));
            }
            Err(e) => {
                return Err(FuzzgateError::Runner(format!("Failed to stop fuzzer container: {}", e)));
            }
        }

        self.docker
            .remove_container(&name, Some(RemoveContainerOptions { force: true, ..Default::default() }))
            .await
            .map_err(|e| FuzzgateError::Runner(format!("Failed to remove fuzzer container: {}", e)))?;
        info!(container = %name, "Fuzzer container removed");

        Ok(())
    }

    fn deployment_name(&self) -> &str {
        "docker"
    }
}
