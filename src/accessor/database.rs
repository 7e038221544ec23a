use std::time::Duration;
use async_trait::async_trait;
use tracing::debug;
use crate::db::Database;
use crate::errors::FuzzgateError;
use crate::models::{ApiId, ApiInfo, Notification};
use crate::session::ApiFuzzState;
use super::Accessor;

/// Upper bound on a single forwarded delivery, connection included.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Accessor backed by the local SQLite database.
///
/// Notifications always land in the outbox table; when a notification URL is
/// configured they are also POSTed to `<url>/notification/<apiId>`.
#[derive(Clone)]
pub struct DatabaseAccessor {
    db: Database,
    http: reqwest::Client,
    notification_url: Option<String>,
}

impl DatabaseAccessor {
    pub fn new(db: Database, notification_url: Option<String>) -> Self {
        Self {
            db,
            http: reqwest::Client::new(),
            notification_url: notification_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    async fn forward(&self, base: &str, api_id: ApiId, notification: &Notification) -> Result<(), FuzzgateError> {
        let endpoint = format!("{}/notification/{}", base, api_id);
        self.http
            .post(&endpoint)
            .timeout(NOTIFY_TIMEOUT)
            .json(notification)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| FuzzgateError::Network(format!("Failed to deliver notification to {}: {}", endpoint, e)))?;
        debug!(api_id, endpoint = %endpoint, "Notification forwarded");
        Ok(())
    }
}

#[async_trait]
impl Accessor for DatabaseAccessor {
    async fn get_api(&self, api_id: ApiId) -> Result<Option<ApiInfo>, FuzzgateError> {
        self.db.get_api(api_id)
    }

    async fn load_fuzz_state(&self, api_id: ApiId) -> Result<Option<ApiFuzzState>, FuzzgateError> {
        self.db.load_fuzz_state(api_id)
    }

    async fn save_fuzz_state(&self, api_id: ApiId, state: &ApiFuzzState) -> Result<(), FuzzgateError> {
        self.db.save_fuzz_state(api_id, state)
    }

    async fn notify(&self, module: &str, api_id: ApiId, notification: &Notification) -> Result<(), FuzzgateError> {
        self.db.insert_notification(module, api_id, notification)?;
        if let Some(base) = &self.notification_url {
            self.forward(base, api_id, notification).await?;
        }
        Ok(())
    }
}
