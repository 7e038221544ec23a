use serde_json::{json, Value};
use crate::errors::FuzzgateError;
use crate::models::{ApiFindings, ApiId, Report, ShortTestProgress, ShortTestReport, Test};
use crate::session::ApiFuzzState;
use super::{Fuzzer, MODULE_VERSION};

impl Fuzzer {
    async fn fuzz_state(&self, api_id: ApiId) -> Result<ApiFuzzState, FuzzgateError> {
        self.resolve_api(api_id).await?;
        self.sessions.snapshot(api_id).await
    }

    fn no_test(api_id: ApiId) -> FuzzgateError {
        FuzzgateError::NotFound(format!("No fuzzing test for API {}", api_id))
    }

    /// Progress of the running session. NotFound when nothing is running.
    pub async fn get_progress(&self, api_id: ApiId) -> Result<ShortTestProgress, FuzzgateError> {
        let state = self.fuzz_state(api_id).await?;
        match state.last_test() {
            Some(test) if state.in_fuzzing => Ok(test.short_progress(api_id)),
            _ => Err(FuzzgateError::NotFound(format!(
                "API {} has no fuzzing session in progress",
                api_id
            ))),
        }
    }

    pub async fn get_short_report(&self, api_id: ApiId) -> Result<ShortTestReport, FuzzgateError> {
        let state = self.fuzz_state(api_id).await?;
        state
            .last_test()
            .map(|t| t.short_report(api_id))
            .ok_or_else(|| Self::no_test(api_id))
    }

    pub async fn get_last_report(&self, api_id: ApiId) -> Result<Report, FuzzgateError> {
        let state = self.fuzz_state(api_id).await?;
        state
            .last_test()
            .map(|t| t.report.clone())
            .ok_or_else(|| Self::no_test(api_id))
    }

    /// Most recently stored findings set; empty when no test has findings yet.
    pub async fn get_findings(&self, api_id: ApiId) -> Result<ApiFindings, FuzzgateError> {
        let state = self.fuzz_state(api_id).await?;
        Ok(state
            .tests
            .iter()
            .rev()
            .find_map(Test::api_findings)
            .unwrap_or_default())
    }

    pub async fn list_tests(&self, api_id: ApiId) -> Result<Vec<Test>, FuzzgateError> {
        Ok(self.fuzz_state(api_id).await?.tests)
    }

    pub async fn get_test(&self, api_id: ApiId, timestamp: i64) -> Result<Test, FuzzgateError> {
        let state = self.fuzz_state(api_id).await?;
        state.test_by_timestamp(timestamp).cloned().ok_or_else(|| {
            FuzzgateError::NotFound(format!("No fuzzing test {} for API {}", timestamp, api_id))
        })
    }

    pub fn state(&self) -> Value {
        json!({
            "version": MODULE_VERSION,
            "apisInCache": self.sessions.cached_count(),
            "deployment": self.client.as_ref().map(|c| c.deployment_name().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::json;
    use crate::accessor::{Accessor, DatabaseAccessor};
    use crate::db::Database;
    use crate::errors::ErrorKind;
    use crate::fuzzer::Fuzzer;
    use crate::models::{ApiInfo, AuthInput, FuzzingInput, FuzzingStatus, ReportTag, Severity, StatusUpdate};
    use crate::runner::FakeClient;

    async fn started() -> Fuzzer {
        let db = Database::in_memory().unwrap();
        db.upsert_api(&ApiInfo { id: 5, name: "search".into(), namespace: None, port: 9000 }).unwrap();
        let accessor: Arc<dyn Accessor> = Arc::new(DatabaseAccessor::new(db, None));
        let fuzzer = Fuzzer::new(accessor, Some(Arc::new(FakeClient::new())));
        fuzzer.start(5, Some(FuzzingInput::new("quick", AuthInput::None))).await.unwrap();
        fuzzer
    }

    fn update(status: FuzzingStatus, progress: u8) -> StatusUpdate {
        StatusUpdate { status, progress, status_message: None, highest_severity: None, tags: vec![] }
    }

    #[tokio::test]
    async fn test_progress_only_while_running() {
        let fuzzer = started().await;
        fuzzer.receive_status(5, update(FuzzingStatus::InProgress, 40)).await.unwrap();
        let progress = fuzzer.get_progress(5).await.unwrap();
        assert_eq!(progress.progress, 40);
        assert_eq!(progress.api_id, 5);

        fuzzer.stop(5).await.unwrap();
        assert_eq!(fuzzer.get_progress(5).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_short_report_reflects_delivery() {
        let fuzzer = started().await;
        let tags = vec![ReportTag { name: "restler".into(), highest_severity: Some(Severity::High), operations: vec![] }];
        let mut done = update(FuzzingStatus::Done, 100);
        done.status_message = Some("all probes finished".into());
        done.highest_severity = Some(Severity::High);
        done.tags = tags.clone();
        fuzzer.receive_status(5, done).await.unwrap();

        let report = fuzzer.get_short_report(5).await.unwrap();
        assert_eq!(report.status, FuzzingStatus::Done);
        assert_eq!(report.status_message.as_deref(), Some("all probes finished"));
        assert_eq!(report.highest_severity, Some(Severity::High));
        assert_eq!(report.tags, tags);
        assert_eq!(fuzzer.get_last_report(5).await.unwrap().progress, 100);
    }

    #[tokio::test]
    async fn test_findings_come_from_latest_test_with_findings() {
        let fuzzer = started().await;
        fuzzer.store_findings(5, json!([{"id": "old"}])).await.unwrap();
        fuzzer.stop(5).await.unwrap();
        fuzzer.start(5, Some(FuzzingInput::new("quick", AuthInput::None))).await.unwrap();

        let findings = fuzzer.get_findings(5).await.unwrap();
        assert_eq!(serde_json::to_value(&findings.items).unwrap(), json!([{"id": "old"}]));
    }

    #[tokio::test]
    async fn test_history_and_lookup_by_timestamp() {
        let fuzzer = started().await;
        let tests = fuzzer.list_tests(5).await.unwrap();
        assert_eq!(tests.len(), 1);
        let ts = tests[0].timestamp;
        assert_eq!(fuzzer.get_test(5, ts).await.unwrap().timestamp, ts);
        assert_eq!(fuzzer.get_test(5, ts + 1).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_module_state() {
        let fuzzer = started().await;
        let state = fuzzer.state();
        assert_eq!(state["apisInCache"], 1);
        assert_eq!(state["deployment"], "fake");
    }
}
