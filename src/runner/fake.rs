use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use tracing::info;
use crate::errors::FuzzgateError;
use crate::models::ApiId;
use super::JobClient;

#[derive(Debug, Clone, PartialEq)]
pub enum RunnerCall {
    Trigger {
        api_id: ApiId,
        target_uri: String,
        auth_material: String,
        time_budget: Duration,
        specs_info: Option<serde_json::Value>,
    },
    Stop {
        api_id: ApiId,
    },
}

/// In-memory job runner: records every call and never sends traffic.
/// Failures can be injected to exercise rollback paths.
#[derive(Default)]
pub struct FakeClient {
    calls: Mutex<Vec<RunnerCall>>,
    fail_trigger: AtomicBool,
    fail_stop: AtomicBool,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_trigger(&self, fail: bool) {
        self.fail_trigger.store(fail, Ordering::SeqCst);
    }

    pub fn fail_stop(&self, fail: bool) {
        self.fail_stop.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RunnerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: RunnerCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl JobClient for FakeClient {
    async fn trigger_job(
        &self,
        api_id: ApiId,
        target_uri: &str,
        auth_material: &str,
        time_budget: Duration,
        specs_info: Option<&serde_json::Value>,
    ) -> Result<(), FuzzgateError> {
        self.record(RunnerCall::Trigger {
            api_id,
            target_uri: target_uri.to_string(),
            auth_material: auth_material.to_string(),
            time_budget,
            specs_info: specs_info.cloned(),
        });
        if self.fail_trigger.load(Ordering::SeqCst) {
            return Err(FuzzgateError::Runner(format!("injected trigger failure for API {}", api_id)));
        }
        info!(api_id, target = %target_uri, budget_secs = time_budget.as_secs(), "Fake fuzzing job triggered");
        Ok(())
    }

    async fn stop_job(&self, api_id: ApiId) -> Result<(), FuzzgateError> {
        self.record(RunnerCall::Stop { api_id });
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(FuzzgateError::Runner(format!("injected stop failure for API {}", api_id)));
        }
        info!(api_id, "Fake fuzzing job stopped");
        Ok(())
    }

    fn deployment_name(&self) -> &str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let client = FakeClient::new();
        client.trigger_job(1, "http://a:80", "", Duration::from_secs(60), None).await.unwrap();
        client.stop_job(1).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], RunnerCall::Trigger { api_id: 1, target_uri, .. } if target_uri == "http://a:80"));
        assert_eq!(calls[1], RunnerCall::Stop { api_id: 1 });
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let client = FakeClient::new();
        client.fail_trigger(true);
        client.fail_stop(true);
        assert!(client.trigger_job(2, "http://b:80", "", Duration::from_secs(1), None).await.is_err());
        assert!(client.stop_job(2).await.is_err());
        // Failed calls are still recorded.
        assert_eq!(client.calls().len(), 2);
    }
}
