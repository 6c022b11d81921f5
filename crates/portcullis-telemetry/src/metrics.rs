//! Prometheus metrics for Portcullis.
//!
//! # Decision Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `portcullis_authorization_decisions_total` | Counter | `level` | Required levels returned |
//! | `portcullis_regulation_checks_total` | Counter | `outcome` | Regulation checks by outcome |
//! | `portcullis_authentication_attempts_total` | Counter | `succeeded` | First-factor attempts recorded |
//!
//! The recording functions are no-ops until a recorder is installed, so the
//! engines can be used without metrics.

use std::fmt;
use std::net::SocketAddr;
use std::sync::OnceLock;

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use portcullis_core::Level;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Counter of authorization decisions.
pub const AUTHORIZATION_DECISIONS_TOTAL: &str = "portcullis_authorization_decisions_total";

/// Counter of regulation checks.
pub const REGULATION_CHECKS_TOTAL: &str = "portcullis_regulation_checks_total";

/// Counter of recorded first-factor attempts.
pub const AUTHENTICATION_ATTEMPTS_TOTAL: &str = "portcullis_authentication_attempts_total";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether metrics are exported.
    pub enabled: bool,

    /// Address of the Prometheus scrape listener (e.g., "0.0.0.0:9090").
    pub addr: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Outcome label of a regulation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegulationOutcome {
    /// The attempt may proceed.
    Allowed,
    /// The user is locked out.
    Regulated,
    /// No decision: the trace store failed.
    Error,
}

impl RegulationOutcome {
    /// Label value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Regulated => "regulated",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RegulationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Installs the Prometheus recorder and its scrape listener.
///
/// The listener is bound before this returns and served by a task spawned on
/// the ambient Tokio runtime, so this must be called from within one.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let addr: SocketAddr = config
        .addr
        .parse()
        .map_err(|e| TelemetryError::InvalidAddress(format!("{}: {e}", config.addr)))?;

    let runtime = Handle::try_current().map_err(|e| {
        TelemetryError::MetricsInit(format!("scrape listener needs a Tokio runtime: {e}"))
    })?;

    let (recorder, exporter) = PrometheusBuilder::new()
        .with_http_listener(addr)
        .build()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let handle = recorder.handle();
    metrics::set_global_recorder(recorder)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    runtime.spawn(async move {
        if let Err(e) = exporter.await {
            warn!(error = ?e, "prometheus scrape listener stopped");
        }
    });

    let _ = METRICS_HANDLE.set(handle);
    register_metric_descriptions();
    info!(%addr, "prometheus scrape listener started");

    Ok(())
}

/// Renders metrics in Prometheus format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(
        AUTHORIZATION_DECISIONS_TOTAL,
        "Authorization decisions by required authentication level"
    );
    describe_counter!(
        REGULATION_CHECKS_TOTAL,
        "Brute-force regulation checks by outcome"
    );
    describe_counter!(
        AUTHENTICATION_ATTEMPTS_TOTAL,
        "First-factor authentication attempts by result"
    );
}

/// Records the level returned by an authorization decision.
pub fn record_authorization_decision(level: Level) {
    counter!(AUTHORIZATION_DECISIONS_TOTAL, "level" => level.as_str()).increment(1);
}

/// Records the outcome of a regulation check.
pub fn record_regulation_check(outcome: RegulationOutcome) {
    counter!(REGULATION_CHECKS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Records a first-factor authentication attempt.
pub fn record_authentication_attempt(succeeded: bool) {
    let succeeded = if succeeded { "true" } else { "false" };
    counter!(AUTHENTICATION_ATTEMPTS_TOTAL, "succeeded" => succeeded).increment(1);
}
