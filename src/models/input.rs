use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::time::Duration;
use crate::errors::FuzzgateError;

/// How hard the job runner should fuzz. Forwarded as a time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Depth {
    Quick,
    #[default]
    Default,
    Deep,
}

impl Depth {
    pub fn time_budget(&self) -> Duration {
        match self {
            Self::Quick => Duration::from_secs(6 * 60),
            Self::Default => Duration::from_secs(30 * 60),
            Self::Deep => Duration::from_secs(2 * 60 * 60),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "QUICK",
            Self::Default => "DEFAULT",
            Self::Deep => "DEEP",
        }
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Depth {
    type Err = FuzzgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" | "shallow" => Ok(Self::Quick),
            "default" | "standard" => Ok(Self::Default),
            "deep" | "thorough" => Ok(Self::Deep),
            "" => Err(FuzzgateError::InvalidParameter("Missing depth".into())),
            other => Err(FuzzgateError::InvalidParameter(format!("Invalid depth: {}", other))),
        }
    }
}

/// Credentials the job runner should use while probing the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthInput {
    None,
    Basic { username: String, password: String },
    Bearer { token: String },
    ApiKey { key: String, value: String },
}

impl AuthInput {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::ApiKey { .. } => "apikey",
        }
    }

    /// Render the opaque header line handed to the job runner.
    pub fn auth_material(&self) -> Result<String, FuzzgateError> {
        match self {
            Self::None => Ok(String::new()),
            Self::Basic { username, password } => {
                require("username", username)?;
                let encoded = data_encoding::BASE64.encode(format!("{}:{}", username, password).as_bytes());
                Ok(format!("Authorization: Basic {}", encoded))
            }
            Self::Bearer { token } => {
                require("token", token)?;
                Ok(format!("Authorization: Bearer {}", token))
            }
            Self::ApiKey { key, value } => {
                require("key", key)?;
                require("value", value)?;
                if key.contains(':') || key.contains(char::is_whitespace) {
                    return Err(FuzzgateError::InvalidParameter(format!("Invalid API key header name: {}", key)));
                }
                Ok(format!("{}: {}", key, value))
            }
        }
    }
}

/// Wire forms accepted for `auth`: the tagged object, or a bare kind string.
/// Only credential-free kinds can be named by string.
#[derive(Deserialize)]
#[serde(untagged)]
enum AuthDescriptor {
    Kind(String),
    Full(AuthInput),
}

fn auth_descriptor<'de, D>(deserializer: D) -> Result<Option<AuthInput>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AuthDescriptor>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AuthDescriptor::Full(auth)) => Ok(Some(auth)),
        Some(AuthDescriptor::Kind(kind)) => match kind.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Some(AuthInput::None)),
            other => Err(de::Error::custom(format!(
                "auth '{}' requires credentials; send an object with a \"type\" field",
                other
            ))),
        },
    }
}

fn require(field: &str, value: &str) -> Result<(), FuzzgateError> {
    if value.trim().is_empty() {
        return Err(FuzzgateError::InvalidParameter(format!("Auth field '{}' must not be empty", field)));
    }
    Ok(())
}

/// Caller-supplied parameters for one fuzzing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzingInput {
    /// Raw depth as supplied; parsed when the session starts.
    pub depth: String,
    #[serde(default, deserialize_with = "auth_descriptor")]
    pub auth: Option<AuthInput>,
    /// Read-only context forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs_info: Option<serde_json::Value>,
}

impl FuzzingInput {
    pub fn new(depth: impl Into<String>, auth: AuthInput) -> Self {
        Self {
            depth: depth.into(),
            auth: Some(auth),
            specs_info: None,
        }
    }

    pub fn auth_material(&self) -> Result<String, FuzzgateError> {
        self.auth.as_ref().map_or(Ok(String::new()), AuthInput::auth_material)
    }

    pub fn auth_kind(&self) -> &'static str {
        self.auth.as_ref().map_or("none", AuthInput::kind)
    }
}
