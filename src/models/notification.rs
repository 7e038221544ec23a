use serde::{Deserialize, Serialize};
use super::finding::ApiFindings;
use super::report::{ShortTestProgress, ShortTestReport};

/// Outbound notification envelope, discriminated by `notificationType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "notificationType")]
pub enum Notification {
    TestProgressNotification(ShortTestProgress),
    TestReportNotification(ShortTestReport),
    ApiFindingsNotification(ApiFindings),
}

impl Notification {
    pub fn notification_type(&self) -> &'static str {
        match self {
            Self::TestProgressNotification(_) => "TestProgressNotification",
            Self::TestReportNotification(_) => "TestReportNotification",
            Self::ApiFindingsNotification(_) => "ApiFindingsNotification",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finding::Finding;
    use crate::models::report::FuzzingStatus;
    use serde_json::json;

    #[test]
    fn test_progress_envelope() {
        let n = Notification::TestProgressNotification(ShortTestProgress {
            api_id: 7,
            progress: 40,
            starttime: 100,
        });
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(
            value,
            json!({"notificationType": "TestProgressNotification", "apiID": 7, "progress": 40, "starttime": 100})
        );
        assert_eq!(n.notification_type(), "TestProgressNotification");
    }

    #[test]
    fn test_report_envelope_decodes_by_discriminator() {
        let value = json!({
            "notificationType": "TestReportNotification",
            "apiID": 7,
            "starttime": 100,
            "status": "DONE",
            "tags": []
        });
        let decoded: Notification = serde_json::from_value(value).unwrap();
        match decoded {
            Notification::TestReportNotification(report) => {
                assert_eq!(report.status, FuzzingStatus::Done);
                assert!(report.highest_severity.is_none());
            }
            other => panic!("unexpected notification {:?}", other),
        }
    }

    #[test]
    fn test_findings_envelope() {
        let n = Notification::ApiFindingsNotification(ApiFindings {
            items: vec![Finding(json!({"name": "xss"}))],
        });
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["notificationType"], "ApiFindingsNotification");
        assert_eq!(value["items"][0]["name"], "xss");
    }

    #[test]
    fn test_unknown_discriminator_rejected() {
        let value = json!({"notificationType": "SpecDiffsNotification", "diffs": []});
        assert!(serde_json::from_value::<Notification>(value).is_err());
    }
}
