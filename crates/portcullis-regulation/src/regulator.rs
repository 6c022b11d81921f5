//! The brute-force regulator.
//!
//! Every completed first-factor attempt is recorded with [`Regulator::mark`].
//! Before the next attempt, [`Regulator::regulate`] looks at the `max_retries`
//! most recent traces of the user and refuses the attempt when all of them
//! are failures that
//!
//! - happened within `find_time` of each other, and
//! - ended less than `ban_time` ago.
//!
//! A single success among those traces lifts the lockout, and so does the
//! passage of `ban_time` since the latest failure. There is no unban call.

use std::sync::Arc;

use portcullis_core::{AuthenticationTrace, RegulationParameters};
use tracing::{debug, info, instrument};

use crate::clock::{Clock, SystemClock};
use crate::error::{RegulationError, RegulationResult, StoreResult};
use crate::store::TraceStore;

/// Sliding-window guard against password guessing.
///
/// Holds no state of its own besides its parameters; everything it knows
/// about past attempts comes from the trace store.
#[derive(Clone)]
pub struct Regulator {
    params: RegulationParameters,
    store: Arc<dyn TraceStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Regulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regulator")
            .field("params", &self.params)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Regulator {
    /// Creates a regulator reading the system clock.
    pub fn new(params: RegulationParameters, store: Arc<dyn TraceStore>) -> Self {
        Self::with_clock(params, store, Arc::new(SystemClock))
    }

    /// Creates a regulator reading `clock`.
    pub fn with_clock(
        params: RegulationParameters,
        store: Arc<dyn TraceStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        if params.is_enabled() {
            info!(
                max_retries = params.max_retries,
                find_time = params.find_time,
                ban_time = params.ban_time,
                "regulation enabled"
            );
        } else {
            debug!("regulation disabled");
        }
        Self {
            params,
            store,
            clock,
        }
    }

    /// The parameters this regulator applies.
    pub const fn params(&self) -> &RegulationParameters {
        &self.params
    }

    /// Records the outcome of a completed first-factor attempt.
    ///
    /// Must complete before the next [`regulate`](Self::regulate) call for the
    /// same user so the attempt is part of the window.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn mark(&self, user_id: &str, succeeded: bool) -> StoreResult<()> {
        let trace = AuthenticationTrace::new(user_id, self.clock.now(), succeeded);
        self.store.save_trace(&trace).await
    }

    /// Checks whether `user_id` may make another attempt.
    ///
    /// Returns [`RegulationError::Regulated`] while the user is locked out and
    /// [`RegulationError::Store`] when the traces could not be read.
    #[instrument(level = "debug", skip(self))]
    pub async fn regulate(&self, user_id: &str) -> RegulationResult<()> {
        if !self.params.is_enabled() {
            return Ok(());
        }

        let max_retries = self.params.max_retries as usize;
        let traces = self.store.latest_traces(user_id, max_retries).await?;

        // Not enough history to justify a lockout.
        if traces.len() < max_retries {
            return Ok(());
        }
        let window = &traces[..max_retries];

        if window.iter().any(|trace| trace.succeeded) {
            return Ok(());
        }

        let newest = window[0].timestamp;
        let oldest = window[max_retries - 1].timestamp;
        let ban = self.params.ban_duration();

        let burst_detected = newest.signed_duration_since(oldest) < self.params.find_window();
        let still_cooling_down = self
            .clock
            .now()
            .checked_sub_signed(ban)
            .map_or(true, |ban_start| ban_start < newest);

        if burst_detected && still_cooling_down {
            let until = newest
                .checked_add_signed(ban)
                .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC);
            info!(user = user_id, %until, "user regulated after repeated failures");
            return Err(RegulationError::regulated(user_id, until));
        }

        Ok(())
    }
}
