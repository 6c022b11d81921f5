//! Root configuration type.
//!
//! This module provides the top-level [`PortcullisConfig`] struct and its builder.

use std::net::SocketAddr;
use std::str::FromStr;

use portcullis_authz::{AccessRule, AuthorizationEngine};
use portcullis_core::{AccessControlConfig, Policy, RegulationParameters};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, MetricsConfig};

/// Complete Portcullis decision-core configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use portcullis_config::PortcullisConfig;
///
/// let config = PortcullisConfig::default();
/// assert!(config.access_control.is_none());
/// assert_eq!(config.regulation.max_retries, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct PortcullisConfig {
    /// Access control rules. Absent means every request bypasses
    /// authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<AccessControlConfig>,

    /// Brute-force regulation.
    #[serde(default)]
    pub regulation: RegulationParameters,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics export.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl PortcullisConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> PortcullisConfigBuilder {
        PortcullisConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// Every access control rule is compiled, so a configuration that passes
    /// here always yields an engine from [`authorization_engine`](Self::authorization_engine).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(acl) = &self.access_control {
            validate_access_control(acl)?;
        }

        if self.regulation.is_enabled() {
            if self.regulation.find_time == 0 {
                return Err(ConfigError::invalid_value(
                    "regulation.find_time",
                    "must be positive when regulation is enabled",
                ));
            }
            if self.regulation.ban_time == 0 {
                return Err(ConfigError::invalid_value(
                    "regulation.ban_time",
                    "must be positive when regulation is enabled",
                ));
            }
        }

        if self.logging.enabled {
            portcullis_telemetry::create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        if self.metrics.enabled && self.metrics.addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::invalid_value(
                "metrics.addr",
                format!("invalid socket address: {}", self.metrics.addr),
            ));
        }

        Ok(())
    }

    /// Builds the authorization engine described by `access_control`.
    pub fn authorization_engine(&self) -> Result<AuthorizationEngine, ConfigError> {
        Ok(AuthorizationEngine::new(self.access_control.as_ref())?)
    }

    /// Create a development configuration preset.
    ///
    /// Pretty debug logs with source locations; metrics off.
    ///
    /// # Example
    ///
    /// ```
    /// use portcullis_config::PortcullisConfig;
    ///
    /// let config = PortcullisConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level and metrics exported. Access control fails
    /// closed until rules are configured.
    ///
    /// # Example
    ///
    /// ```
    /// use portcullis_config::{LogFormat, PortcullisConfig};
    ///
    /// let config = PortcullisConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.ansi_enabled = false;

        config.metrics.enabled = true;

        config.access_control = Some(AccessControlConfig::with_default_policy("deny"));

        config
    }
}

fn validate_access_control(acl: &AccessControlConfig) -> Result<(), ConfigError> {
    Policy::from_str(&acl.default_policy)
        .map_err(|e| ConfigError::invalid_value("access_control.default_policy", e.to_string()))?;

    for (index, rule) in acl.rules.iter().enumerate() {
        Policy::from_str(&rule.policy).map_err(|e| {
            ConfigError::invalid_value(
                format!("access_control.rules[{index}].policy"),
                e.to_string(),
            )
        })?;
        AccessRule::compile(rule).map_err(|e| ConfigError::from(e.in_rule(index)))?;
    }

    Ok(())
}

/// Builder for [`PortcullisConfig`].
#[derive(Debug, Default)]
pub struct PortcullisConfigBuilder {
    access_control: Option<AccessControlConfig>,
    regulation: Option<RegulationParameters>,
    logging: Option<LoggingConfig>,
    metrics: Option<MetricsConfig>,
}

impl PortcullisConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access control rules.
    #[must_use]
    pub fn access_control(mut self, access_control: AccessControlConfig) -> Self {
        self.access_control = Some(access_control);
        self
    }

    /// Set the regulation parameters.
    #[must_use]
    pub fn regulation(mut self, regulation: RegulationParameters) -> Self {
        self.regulation = Some(regulation);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Set the metrics configuration.
    #[must_use]
    pub fn metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> PortcullisConfig {
        PortcullisConfig {
            access_control: self.access_control,
            regulation: self.regulation.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
            metrics: self.metrics.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    pub fn build_validated(self) -> Result<PortcullisConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
