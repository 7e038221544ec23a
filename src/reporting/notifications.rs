use std::sync::Arc;
use tracing::{debug, warn};
use crate::accessor::Accessor;
use crate::models::{ApiId, FuzzingStatus, Notification, Test};

pub fn progress_notification(api_id: ApiId, test: &Test) -> Notification {
    Notification::TestProgressNotification(test.short_progress(api_id))
}

pub fn report_notification(api_id: ApiId, test: &Test) -> Notification {
    Notification::TestReportNotification(test.short_report(api_id))
}

pub fn findings_notification(test: &Test) -> Notification {
    Notification::ApiFindingsNotification(test.api_findings().unwrap_or_default())
}

/// Fans accepted status updates out to subscribers through the accessor.
/// Delivery is best-effort: failures are logged and never surface to callers.
pub struct NotificationDispatcher {
    accessor: Arc<dyn Accessor>,
    module: String,
}

impl NotificationDispatcher {
    pub fn new(accessor: Arc<dyn Accessor>, module: impl Into<String>) -> Self {
        Self {
            accessor,
            module: module.into(),
        }
    }

    /// Emit the notifications owed for `test` after an accepted update.
    ///
    /// A running test yields a progress notification. The completion edge
    /// yields the final report followed by the findings.
    pub async fn dispatch(&self, api_id: ApiId, test: &Test, completion_edge: bool) {
        if test.report.status == FuzzingStatus::InProgress {
            self.send(api_id, progress_notification(api_id, test)).await;
        }
        if completion_edge {
            self.send(api_id, report_notification(api_id, test)).await;
            self.send(api_id, findings_notification(test)).await;
        }
    }

    async fn send(&self, api_id: ApiId, notification: Notification) {
        let kind = notification.notification_type();
        match self.accessor.notify(&self.module, api_id, &notification).await {
            Ok(()) => debug!(api_id, notification = kind, "Notification sent"),
            Err(e) => warn!(api_id, notification = kind, error = %e, "Failed to send notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::DatabaseAccessor;
    use crate::db::Database;
    use crate::models::{ApiInfo, Depth, TestParameters};
    use serde_json::json;

    fn setup() -> (NotificationDispatcher, Database) {
        let db = Database::in_memory().unwrap();
        db.upsert_api(&ApiInfo { id: 9, name: "cart".into(), namespace: None, port: 80 }).unwrap();
        let accessor: Arc<dyn Accessor> = Arc::new(DatabaseAccessor::new(db.clone(), None));
        (NotificationDispatcher::new(accessor, "fuzzer"), db)
    }

    fn test_with(status: FuzzingStatus, progress: u8) -> Test {
        let mut test = Test::new(100, 100, TestParameters::new(Depth::Quick, "none"));
        test.report.status = status;
        test.report.progress = progress;
        test
    }

    fn types(db: &Database) -> Vec<String> {
        db.list_notifications(9, 50)
            .unwrap()
            .iter()
            .map(|n| n["notification_type"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_running_test_emits_progress_only() {
        let (dispatcher, db) = setup();
        dispatcher.dispatch(9, &test_with(FuzzingStatus::InProgress, 40), false).await;
        assert_eq!(types(&db), vec!["TestProgressNotification"]);
    }

    #[tokio::test]
    async fn test_completion_emits_report_then_findings() {
        let (dispatcher, db) = setup();
        let mut test = test_with(FuzzingStatus::Done, 100);
        test.findings = Some(json!({"items": [{"name": "sqli"}], "tool": "restler"}));
        dispatcher.dispatch(9, &test, true).await;
        assert_eq!(types(&db), vec!["TestReportNotification", "ApiFindingsNotification"]);

        let rows = db.list_notifications(9, 50).unwrap();
        assert_eq!(rows[1]["payload"]["items"], json!([{"name": "sqli"}]));
    }

    #[tokio::test]
    async fn test_terminal_without_edge_emits_nothing() {
        let (dispatcher, db) = setup();
        dispatcher.dispatch(9, &test_with(FuzzingStatus::Done, 100), false).await;
        assert!(types(&db).is_empty());
    }

    #[test]
    fn test_findings_notification_defaults_to_empty() {
        let test = test_with(FuzzingStatus::Done, 100);
        match findings_notification(&test) {
            Notification::ApiFindingsNotification(f) => assert!(f.items.is_empty()),
            other => panic!("unexpected notification {:?}", other),
        }
    }
}
