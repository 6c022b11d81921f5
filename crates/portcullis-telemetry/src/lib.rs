//! Observability for Portcullis.
//!
//! - **Logging**: structured events from `tracing`, printed as JSON lines or
//!   pretty multi-line output
//! - **Metrics**: decision counters exported in Prometheus format
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  portcullis-authz / portcullis-regulation           │
//! │      tracing::debug!/info!/warn!                    │
//! └──────────────┬──────────────────────────────────────┘
//!                │              Gatekeeper
//!                │              record_*()
//!                ▼                  ▼
//!        ┌──────────────┐   ┌──────────────┐
//!        │   Logging    │   │   Metrics    │
//!        │ (subscriber) │   │ (Prometheus) │
//!        └──────┬───────┘   └──────┬───────┘
//!               ▼                  ▼
//!          stdout/stderr       /metrics
//! ```
//!
//! # Metrics Endpoint
//!
//! ```text
//! # HELP portcullis_authorization_decisions_total Authorization decisions by required authentication level
//! # TYPE portcullis_authorization_decisions_total counter
//! portcullis_authorization_decisions_total{level="two_factor"} 1234
//! portcullis_regulation_checks_total{outcome="regulated"} 7
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};
pub use crate::metrics::{
    init_metrics, record_authentication_attempt, record_authorization_decision,
    record_regulation_check, render_metrics, MetricsConfig, RegulationOutcome,
};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Logging and metrics settings together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Logging settings.
    pub logging: LogConfig,
    /// Metrics settings.
    pub metrics: MetricsConfig,
}

impl TelemetryConfig {
    /// Pretty debug logs, metrics off.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LogConfig::development(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Initializes logging, then metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}
