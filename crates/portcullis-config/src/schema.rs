//! Configuration sections besides access control and regulation.
//!
//! The access control and regulation sections reuse the types from
//! `portcullis-core` so the engines can be built straight from a loaded file.

use portcullis_telemetry::{LogConfig, MetricsConfig as TelemetryMetricsConfig};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directives (trace, debug, info, warn, error, or per-target).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in pretty output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Settings for [`portcullis_telemetry::init_logging`].
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let pretty = self.format == LogFormat::Pretty;
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: !pretty,
            span_events: pretty,
            file_line_info: self.include_location,
            ansi: self.ansi_enabled,
            include_target: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Export decision counters.
    #[serde(default)]
    pub enabled: bool,

    /// Prometheus scrape listener address.
    #[serde(default = "default_metrics_addr")]
    pub addr: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: default_metrics_addr(),
        }
    }
}

impl MetricsConfig {
    /// Settings for [`portcullis_telemetry::init_metrics`].
    #[must_use]
    pub fn to_metrics_config(&self) -> TelemetryMetricsConfig {
        TelemetryMetricsConfig {
            enabled: self.enabled,
            addr: self.addr.clone(),
        }
    }
}

fn default_metrics_addr() -> String {
    "0.0.0.0:9090".to_string()
}
