use std::path::Path;
use crate::errors::FuzzgateError;
use super::types::{DeploymentType, FuzzgateConfig};
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<FuzzgateConfig, FuzzgateError> {
    if !path.exists() {
        return Err(FuzzgateError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(FuzzgateError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: FuzzgateConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Load the config file when given, fall back to defaults, then apply
/// `FUZZGATE_*` environment overrides.
pub async fn load_config(path: Option<&Path>) -> Result<FuzzgateConfig, FuzzgateError> {
    let mut config = match path {
        Some(p) => parse_config(p).await?,
        None => FuzzgateConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_semantics(&config)?;
    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut FuzzgateConfig, lookup: F) -> Result<(), FuzzgateError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("FUZZGATE_DEPLOYMENT_TYPE") {
        config.fuzzer.deployment_type = value
            .parse::<DeploymentType>()
            .map_err(FuzzgateError::Config)?;
    }
    if let Some(value) = lookup("FUZZGATE_PLATFORM_HOST").filter(|v| !v.is_empty()) {
        config.fuzzer.platform_host = Some(value);
    }
    if let Some(value) = lookup("FUZZGATE_NOTIFICATION_URL").filter(|v| !v.is_empty()) {
        config.notifications.url = Some(value);
    }
    Ok(())
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), FuzzgateError> {
    // Convert YAML value to JSON for schema validation
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| FuzzgateError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| FuzzgateError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed parsing below is authoritative.
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &FuzzgateConfig) -> Result<(), FuzzgateError> {
    if config.fuzzer.deployment_type == DeploymentType::Docker && config.fuzzer.docker.image.trim().is_empty() {
        return Err(FuzzgateError::Config("Docker deployment requires fuzzer.docker.image".into()));
    }

    if let Some(url) = &config.notifications.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FuzzgateError::Config(format!("Notification URL must be http(s): {}", url)));
        }
    }

    if config.fuzzer.platform_host.is_none() && config.fuzzer.deployment_type != DeploymentType::Fake {
        warn!("fuzzer.platform_host not set; job runners will not be able to report back");
    }

    Ok(())
}
