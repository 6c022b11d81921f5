//! # Portcullis
//!
//! **Decision core of an authentication gateway**
//!
//! A reverse proxy asks Portcullis two questions:
//!
//! - **Which authentication level does this request need?** Ordered access
//!   control rules match on domain, resource path, user or group, and source
//!   network. The first matching rule wins; otherwise the default policy
//!   applies.
//! - **May this user try another password?** The regulator looks at the
//!   user's recent authentication traces and locks out bursts of failures for
//!   a cool-down period.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use portcullis::prelude::*;
//!
//! let config = ConfigLoader::new()
//!     .with_string(
//!         r#"
//!         [access_control]
//!         default_policy = "deny"
//!
//!         [[access_control.rules]]
//!         domain = "*.example.com"
//!         policy = "one_factor"
//!         "#,
//!         "toml",
//!     )?
//!     .load()?;
//!
//! let gatekeeper = Gatekeeper::from_config(&config, Arc::new(MemoryTraceStore::new()))?;
//!
//! let level = gatekeeper.authorize(
//!     &AccessObject::new("app.example.com", "/"),
//!     &Subject::user("john"),
//!     "192.168.1.20".parse().unwrap(),
//! );
//! assert_eq!(level, Level::OneFactor);
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PortcullisConfig ──▶ Gatekeeper ─┬─▶ AuthorizationEngine ──▶ Level
//!                                  └─▶ Regulator ──▶ TraceStore
//!                                          │
//!                                        Clock
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod gatekeeper;

pub use gatekeeper::Gatekeeper;

// Re-export core types
pub use portcullis_core as core;

// Re-export access control types
pub use portcullis_authz as authz;

// Re-export regulation types
pub use portcullis_regulation as regulation;

// Re-export configuration types
pub use portcullis_config as config;

// Re-export telemetry types
pub use portcullis_telemetry as telemetry;

/// Installs logging and metrics as described by `config`.
///
/// With metrics enabled this must run inside a Tokio runtime, which serves
/// the scrape listener.
pub fn init_telemetry(
    config: &portcullis_config::PortcullisConfig,
) -> portcullis_telemetry::TelemetryResult<()> {
    portcullis_telemetry::init_telemetry(&portcullis_telemetry::TelemetryConfig {
        logging: config.logging.to_log_config(),
        metrics: config.metrics.to_metrics_config(),
    })
}

/// Prelude module for convenient imports.
///
/// ```
/// use portcullis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Gatekeeper;

    pub use portcullis_core::{
        AccessControlConfig, AccessObject, AccessRuleConfig, AuthenticationTrace, Level,
        PortcullisError, RegulationParameters, Subject,
    };

    pub use portcullis_authz::{AuthorizationEngine, AuthzError, Decision};

    pub use portcullis_regulation::{
        Clock, MemoryTraceStore, RegulationError, Regulator, StoreError, SystemClock, TraceStore,
    };

    pub use portcullis_config::{ConfigError, ConfigLoader, PortcullisConfig};
}
