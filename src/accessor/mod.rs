//! Storage and notification capability the fuzzer module runs against.

pub mod database;

use async_trait::async_trait;
use crate::errors::FuzzgateError;
use crate::models::{ApiId, ApiInfo, Notification};
use crate::session::ApiFuzzState;

pub use database::DatabaseAccessor;

#[async_trait]
pub trait Accessor: Send + Sync {
    /// Look up an API in the inventory. `Ok(None)` when it does not exist.
    async fn get_api(&self, api_id: ApiId) -> Result<Option<ApiInfo>, FuzzgateError>;

    /// Load the persisted fuzzing state for an API, if any was ever written.
    async fn load_fuzz_state(&self, api_id: ApiId) -> Result<Option<ApiFuzzState>, FuzzgateError>;

    /// Persist the fuzzing flag and the current test; earlier tests are immutable.
    async fn save_fuzz_state(&self, api_id: ApiId, state: &ApiFuzzState) -> Result<(), FuzzgateError>;

    /// Hand a notification to whoever subscribes to `module` events.
    async fn notify(&self, module: &str, api_id: ApiId, notification: &Notification) -> Result<(), FuzzgateError>;
}
