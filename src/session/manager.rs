use std::sync::Arc;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use crate::accessor::Accessor;
use crate::errors::FuzzgateError;
use crate::models::ApiId;
use super::state::ApiFuzzState;

/// Exclusive handle on one API's fuzzing state. Mutations made through it are
/// serialized against every other request for the same API.
pub type SessionGuard = OwnedMutexGuard<ApiFuzzState>;

/// Write-through cache of per-API fuzzing state with one critical section per API.
pub struct SessionStore {
    accessor: Arc<dyn Accessor>,
    sessions: DashMap<ApiId, Arc<Mutex<ApiFuzzState>>>,
}

impl SessionStore {
    pub fn new(accessor: Arc<dyn Accessor>) -> Self {
        Self {
            accessor,
            sessions: DashMap::new(),
        }
    }

    /// Enter the critical section for `api_id`, loading its state on first use.
    pub async fn lock(&self, api_id: ApiId) -> Result<SessionGuard, FuzzgateError> {
        let slot = self.slot(api_id).await?;
        Ok(slot.lock_owned().await)
    }

    /// Copy of the current state, taken inside the critical section.
    pub async fn snapshot(&self, api_id: ApiId) -> Result<ApiFuzzState, FuzzgateError> {
        let guard = self.lock(api_id).await?;
        Ok(guard.clone())
    }

    pub async fn persist(&self, api_id: ApiId, state: &ApiFuzzState) -> Result<(), FuzzgateError> {
        self.accessor.save_fuzz_state(api_id, state).await
    }

    pub fn cached_count(&self) -> usize {
        self.sessions.len()
    }

    async fn slot(&self, api_id: ApiId) -> Result<Arc<Mutex<ApiFuzzState>>, FuzzgateError> {
        if let Some(slot) = self.sessions.get(&api_id) {
            return Ok(slot.clone());
        }

        // Load outside the map shard lock; a concurrent loader may win the
        // insert, in which case its slot is used and this copy is dropped.
        let loaded = self.accessor.load_fuzz_state(api_id).await?.unwrap_or_default();
        debug!(api_id, tests = loaded.tests.len(), in_fuzzing = loaded.in_fuzzing, "Loaded fuzzing state");

        let slot = self
            .sessions
            .entry(api_id)
            .or_insert_with(|| Arc::new(Mutex::new(loaded)))
            .clone();
        Ok(slot)
    }
}
