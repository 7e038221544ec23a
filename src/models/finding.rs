use serde::{Deserialize, Serialize};

/// Severity level reported by the job runner, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

/// A single security observation produced by a fuzzing job.
///
/// The payload is owned by the findings subsystem; it is carried verbatim from
/// webhook ingestion to notification dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Finding(pub serde_json::Value);

/// Findings attached to an API's most recent test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiFindings {
    #[serde(default)]
    pub items: Vec<Finding>,
}

impl ApiFindings {
    /// Findings view of a raw delivery: a bare array, or the `items` array of
    /// an object. Any other shape yields no items; the raw payload is still
    /// kept on the test.
    pub fn from_payload(payload: &serde_json::Value) -> Self {
        let items = match payload {
            serde_json::Value::Array(items) => items.as_slice(),
            serde_json::Value::Object(obj) => match obj.get("items") {
                Some(serde_json::Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            _ => &[],
        };
        Self {
            items: items.iter().cloned().map(Finding).collect(),
        }
    }
}
