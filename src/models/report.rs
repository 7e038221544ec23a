use serde::{Deserialize, Serialize};
use super::api::ApiId;
use super::finding::{Finding, Severity};

/// Lifecycle status of a fuzzing test as reported by the job runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuzzingStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
    Error,
}

impl FuzzingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for FuzzingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOperation {
    pub operation: Operation,
    #[serde(default)]
    pub findings: Vec<Finding>,
}

/// A group of results in a report (one per fuzzing tool or test family).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<Severity>,
    #[serde(default)]
    pub operations: Vec<ReportOperation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub status: FuzzingStatus,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(default)]
    pub tags: Vec<ReportTag>,
}

impl Report {
    pub fn in_progress() -> Self {
        Self {
            status: FuzzingStatus::InProgress,
            ..Default::default()
        }
    }

    /// Close the report from the controller side (stop or failed trigger).
    pub fn terminate(&mut self, status: FuzzingStatus, message: impl Into<String>) {
        self.status = status;
        self.progress = 100;
        self.status_message = Some(message.into());
    }
}

/// A status delivery pushed by the job runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: FuzzingStatus,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<Severity>,
    #[serde(default)]
    pub tags: Vec<ReportTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTestProgress {
    #[serde(rename = "apiID")]
    pub api_id: ApiId,
    pub progress: u8,
    pub starttime: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortTestReport {
    #[serde(rename = "apiID")]
    pub api_id: ApiId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<Severity>,
    pub starttime: i64,
    pub status: FuzzingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(default)]
    pub tags: Vec<ReportTag>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terminal_statuses() {
        assert!(FuzzingStatus::Done.is_terminal());
        assert!(FuzzingStatus::Error.is_terminal());
        assert!(!FuzzingStatus::InProgress.is_terminal());
        assert!(!FuzzingStatus::NotStarted.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&FuzzingStatus::InProgress).unwrap(), "\"IN_PROGRESS\"");
        let parsed: FuzzingStatus = serde_json::from_str("\"NOT_STARTED\"").unwrap();
        assert_eq!(parsed, FuzzingStatus::NotStarted);
        assert_eq!(FuzzingStatus::Done.to_string(), "DONE");
    }

    #[test]
    fn test_terminate_forces_full_progress() {
        let mut report = Report::in_progress();
        report.progress = 12;
        report.terminate(FuzzingStatus::Error, "cancelled");
        assert_eq!(report.status, FuzzingStatus::Error);
        assert_eq!(report.progress, 100);
        assert_eq!(report.status_message.as_deref(), Some("cancelled"));
    }

    #[test]
    fn test_status_update_minimal_body() {
        let update: StatusUpdate =
            serde_json::from_value(json!({"status": "IN_PROGRESS", "progress": 40})).unwrap();
        assert_eq!(update.progress, 40);
        assert!(update.tags.is_empty());
        assert!(update.status_message.is_none());
    }

    #[test]
    fn test_short_report_field_names() {
        let report = ShortTestReport {
            api_id: 7,
            highest_severity: Some(Severity::High),
            starttime: 1_700_000_000,
            status: FuzzingStatus::Done,
            status_message: Some("ok".into()),
            tags: vec![],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["apiID"], 7);
        assert_eq!(value["highestSeverity"], "HIGH");
        assert_eq!(value["statusMessage"], "ok");
        assert_eq!(value["starttime"], 1_700_000_000i64);
    }
}
