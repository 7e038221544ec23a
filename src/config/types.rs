use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FuzzgateConfig {
    pub server: ServerConfig,
    pub fuzzer: FuzzerConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database path
    pub db: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            db: "./data/fuzzgate.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FuzzerConfig {
    pub deployment_type: DeploymentType,
    /// Address the job runner uses to push status and findings back.
    pub platform_host: Option<String>,
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    #[default]
    Docker,
    Kubernetes,
    Fake,
}

impl DeploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Kubernetes => "kubernetes",
            Self::Fake => "fake",
        }
    }
}

impl std::fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(Self::Docker),
            "kubernetes" | "k8s" => Ok(Self::Kubernetes),
            "fake" => Ok(Self::Fake),
            other => Err(format!("Invalid deployment type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DockerConfig {
    pub image: String,
    pub network_mode: String,
    /// Job containers are named `<prefix>-<apiId>`.
    pub container_prefix: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            image: "fuzzgate/fuzzer:latest".to_string(),
            network_mode: "host".to_string(),
            container_prefix: "fuzzgate-fuzzer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NotificationConfig {
    /// Base URL notifications are POSTed to; outbox only when unset.
    pub url: Option<String>,
}
