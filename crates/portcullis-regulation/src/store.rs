//! Authentication trace storage.
//!
//! Persistence of traces belongs to the deployment (a database shared by all
//! gateway instances, typically). The regulator only needs the two operations
//! of [`TraceStore`]. [`MemoryTraceStore`] keeps traces in process memory and
//! suits single-instance deployments and tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use portcullis_core::AuthenticationTrace;
use tracing::trace;

use crate::error::StoreResult;

/// Storage for authentication traces.
///
/// Implementations decide retention. Ordering between concurrent saves and
/// reads for the same user is the implementation's concern as well; the
/// regulator tolerates a read that misses a trace saved a moment earlier.
#[async_trait]
pub trait TraceStore: Send + Sync {
    /// Appends a trace.
    async fn save_trace(&self, trace: &AuthenticationTrace) -> StoreResult<()>;

    /// Returns at most `count` traces for `user_id`, newest first.
    async fn latest_traces(
        &self,
        user_id: &str,
        count: usize,
    ) -> StoreResult<Vec<AuthenticationTrace>>;
}

#[async_trait]
impl<T: TraceStore + ?Sized> TraceStore for Arc<T> {
    async fn save_trace(&self, trace: &AuthenticationTrace) -> StoreResult<()> {
        (**self).save_trace(trace).await
    }

    async fn latest_traces(
        &self,
        user_id: &str,
        count: usize,
    ) -> StoreResult<Vec<AuthenticationTrace>> {
        (**self).latest_traces(user_id, count).await
    }
}

/// Default number of traces kept per user by [`MemoryTraceStore`].
pub const DEFAULT_HISTORY_PER_USER: usize = 100;

/// In-process trace store with a bounded history per user.
#[derive(Debug)]
pub struct MemoryTraceStore {
    history_per_user: usize,
    traces: RwLock<HashMap<String, VecDeque<AuthenticationTrace>>>,
}

impl Default for MemoryTraceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTraceStore {
    /// Creates a store keeping [`DEFAULT_HISTORY_PER_USER`] traces per user.
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY_PER_USER)
    }

    /// Creates a store keeping at most `history_per_user` traces per user.
    ///
    /// The history must be at least as long as the regulator's `max_retries`,
    /// or lockouts can never trigger.
    pub fn with_history(history_per_user: usize) -> Self {
        Self {
            history_per_user: history_per_user.max(1),
            traces: RwLock::new(HashMap::new()),
        }
    }

    /// Number of users with at least one trace.
    pub fn user_count(&self) -> usize {
        self.traces.read().len()
    }

    /// Number of traces held for `user_id`.
    pub fn trace_count(&self, user_id: &str) -> usize {
        self.traces.read().get(user_id).map_or(0, VecDeque::len)
    }

    /// Drops all traces.
    pub fn clear(&self) {
        self.traces.write().clear();
    }
}

#[async_trait]
impl TraceStore for MemoryTraceStore {
    async fn save_trace(&self, trace: &AuthenticationTrace) -> StoreResult<()> {
        let mut traces = self.traces.write();
        let history = traces.entry(trace.user_id.clone()).or_default();

        // Newest first; a trace saved late still lands in timestamp order.
        let position = history
            .iter()
            .position(|existing| existing.timestamp <= trace.timestamp)
            .unwrap_or(history.len());
        history.insert(position, trace.clone());
        history.truncate(self.history_per_user);

        trace!(
            user = %trace.user_id,
            succeeded = trace.succeeded,
            kept = history.len(),
            "trace saved"
        );
        Ok(())
    }

    async fn latest_traces(
        &self,
        user_id: &str,
        count: usize,
    ) -> StoreResult<Vec<AuthenticationTrace>> {
        let traces = self.traces.read();
        Ok(traces
            .get(user_id)
            .map(|history| history.iter().take(count).cloned().collect())
            .unwrap_or_default())
    }
}
