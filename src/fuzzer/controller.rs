use chrono::Utc;
use tracing::{error, info, warn};
use crate::errors::FuzzgateError;
use crate::models::{ApiId, Depth, FuzzingInput, TestParameters};
use super::Fuzzer;

pub const CANCELLED_BY_USER: &str = "Fuzzing cancelled by user";

impl Fuzzer {
    /// Open a fuzzing session for `api_id` and hand it to the job runner.
    /// Returns the new test's timestamp handle.
    pub async fn start(&self, api_id: ApiId, input: Option<FuzzingInput>) -> Result<i64, FuzzgateError> {
        let api = self.resolve_api(api_id).await?;
        let input = input.ok_or_else(|| FuzzgateError::InvalidParameter("Missing fuzzing input".into()))?;
        let depth: Depth = input.depth.parse()?;
        let auth_material = input.auth_material()?;
        let client = self.client()?;
        let target_uri = api.target_uri();

        let mut session = self.sessions.lock(api_id).await?;

        // Work on a copy so a failed persist leaves the cached state untouched.
        let mut next = session.clone();
        let params = TestParameters {
            depth,
            auth_type: input.auth_kind().to_string(),
            specs_info: input.specs_info.clone(),
        };
        let timestamp = next.begin_test(api_id, Utc::now().timestamp(), params)?;
        self.sessions
            .persist(api_id, &next)
            .await
            .map_err(FuzzgateError::into_plugin)?;
        *session = next;

        info!(
            api_id,
            timestamp,
            target = %target_uri,
            depth = %depth,
            auth = %input.auth_kind(),
            "Fuzzing session opened"
        );

        if let Err(e) = client
            .trigger_job(api_id, &target_uri, &auth_material, depth.time_budget(), input.specs_info.as_ref())
            .await
        {
            let message = format!("Failed to trigger fuzzing job: {}", e);
            error!(api_id, timestamp, error = %e, "Fuzzing job trigger failed, closing session");
            session.terminate_current(message.clone());
            if let Err(pe) = self.sessions.persist(api_id, &session).await {
                error!(api_id, timestamp, error = %pe, "Failed to persist rolled back session");
            }
            return Err(FuzzgateError::Plugin(message));
        }

        Ok(timestamp)
    }

    /// Cancel the running session. Local state is committed before the
    /// runner is asked to stop, so a failing remote stop still leaves the
    /// test closed as ERROR.
    pub async fn stop(&self, api_id: ApiId) -> Result<(), FuzzgateError> {
        self.resolve_api(api_id).await?;
        let client = self.client()?;

        let mut session = self.sessions.lock(api_id).await?;
        if !session.in_fuzzing {
            return Err(FuzzgateError::InvalidParameter(format!(
                "API {} has no fuzzing session in progress",
                api_id
            )));
        }

        session.terminate_current(CANCELLED_BY_USER);
        if let Err(e) = self.sessions.persist(api_id, &session).await {
            error!(api_id, error = %e, "Failed to persist cancelled session");
        }
        info!(api_id, "Fuzzing session cancelled");

        client.stop_job(api_id).await.map_err(|e| {
            warn!(api_id, error = %e, "Job runner failed to stop fuzzing job");
            FuzzgateError::Plugin(format!("Failed to stop fuzzing job: {}", e))
        })
    }
}
