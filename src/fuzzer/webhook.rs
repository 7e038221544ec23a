use tracing::{debug, error, info};
use crate::errors::FuzzgateError;
use crate::models::{ApiFindings, ApiId, StatusUpdate};
use crate::reporting::merge;
use super::Fuzzer;

impl Fuzzer {
    /// Apply a status delivery pushed by the job runner to the API's current test.
    pub async fn receive_status(&self, api_id: ApiId, update: StatusUpdate) -> Result<(), FuzzgateError> {
        if update.progress > 100 {
            return Err(FuzzgateError::InvalidParameter(format!(
                "Progress must be between 0 and 100, got {}",
                update.progress
            )));
        }
        self.resolve_api(api_id).await?;

        let mut session = self.sessions.lock(api_id).await?;
        let (test, completion_edge) = {
            let test = session
                .last_test_mut()
                .ok_or_else(|| FuzzgateError::NotFound(format!("No fuzzing test for API {}", api_id)))?;
            let outcome = merge(&test.report, &update);
            test.report = outcome.report;
            (test.clone(), outcome.completion_edge)
        };

        if completion_edge {
            session.in_fuzzing = false;
            info!(
                api_id,
                timestamp = test.timestamp,
                status = %test.report.status,
                "Fuzzing session completed"
            );
        } else {
            debug!(api_id, progress = test.report.progress, status = %test.report.status, "Status update applied");
        }

        // The runner has already moved on; a failed write is not rolled back.
        if let Err(e) = self.sessions.persist(api_id, &session).await {
            error!(api_id, error = %e, "Failed to persist status update");
        }
        drop(session);

        self.dispatcher.dispatch(api_id, &test, completion_edge).await;
        Ok(())
    }

    /// Replace the current test's findings with the delivered payload, kept verbatim.
    pub async fn store_findings(&self, api_id: ApiId, payload: serde_json::Value) -> Result<(), FuzzgateError> {
        self.resolve_api(api_id).await?;

        let mut session = self.sessions.lock(api_id).await?;
        let test = session
            .last_test_mut()
            .ok_or_else(|| FuzzgateError::NotFound(format!("No fuzzing test for API {}", api_id)))?;
        let count = ApiFindings::from_payload(&payload).items.len();
        test.findings = Some(payload);
        let timestamp = test.timestamp;

        if let Err(e) = self.sessions.persist(api_id, &session).await {
            error!(api_id, error = %e, "Failed to persist findings");
        }
        info!(api_id, timestamp, count, "Findings stored");
        Ok(())
    }
}
