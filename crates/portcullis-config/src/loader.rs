//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::env;
use std::fs;
use std::path::Path;

use portcullis_core::AccessControlConfig;
use tracing::debug;

use crate::{ConfigError, LogFormat, PortcullisConfig};

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables
///
/// # Example
///
/// ```no_run
/// use portcullis_config::ConfigLoader;
///
/// # fn main() -> Result<(), portcullis_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_file("/etc/portcullis/config.toml")?
///     .with_env_prefix("PORTCULLIS")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: PortcullisConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: PortcullisConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with development preset configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use portcullis_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_development()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = PortcullisConfig::development();
        self
    }

    /// Start with production preset configuration.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = PortcullisConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`. Unknown fields
    /// are rejected.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let file_config = Self::parse_file(&content, path)?;
        self.merge_config(file_config);
        debug!(path = %path.display(), "configuration file loaded");

        Ok(self)
    }

    /// Load configuration from a file if it exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in `format` ("toml" or "json").
    ///
    /// # Example
    ///
    /// ```
    /// use portcullis_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [access_control]
    ///     default_policy = "deny"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(config.access_control.is_some());
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let file_config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };

        self.merge_config(file_config);
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Variables use the format `PREFIX__SECTION__KEY`, for example
    /// `PORTCULLIS__REGULATION__MAX_RETRIES=5`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file from the working directory or its parents, if any.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "environment file loaded"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(ConfigError::env_parse_error(".env", e.to_string())),
        }
        Ok(self)
    }

    /// Finalize and return the validated configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use portcullis_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().load().unwrap();
    /// assert_eq!(config.regulation.ban_time, 300);
    /// ```
    pub fn load(self) -> Result<PortcullisConfig, ConfigError> {
        let config = self.load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Finalize without validation.
    ///
    /// Environment overrides are still applied and can still fail to parse.
    pub fn load_unvalidated(mut self) -> Result<PortcullisConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }
        Ok(self.config)
    }

    fn parse_file(content: &str, path: &Path) -> Result<PortcullisConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    // A file replaces the whole document; omitted sections take their defaults.
    fn merge_config(&mut self, file_config: PortcullisConfig) {
        self.config = file_config;
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> =
            env::vars().filter(|(k, _)| k.starts_with(&marker)).collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["ACCESS_CONTROL", "DEFAULT_POLICY"] => {
                self.config
                    .access_control
                    .get_or_insert_with(AccessControlConfig::default)
                    .default_policy = value.to_string();
            }

            ["REGULATION", "MAX_RETRIES"] => {
                self.config.regulation.max_retries = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }
            ["REGULATION", "FIND_TIME"] => {
                self.config.regulation.find_time = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected seconds"))?;
            }
            ["REGULATION", "BAN_TIME"] => {
                self.config.regulation.ban_time = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected seconds"))?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }

            ["METRICS", "ENABLED"] => {
                self.config.metrics.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["METRICS", "ADDR"] => {
                self.config.metrics.addr = value.to_string();
            }

            _ => debug!(var = key, "ignoring unrecognized configuration variable"),
        }

        Ok(())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, PortcullisConfig::default());
    }

    #[test]
    fn test_loader_with_development() {
        let config = ConfigLoader::new().with_development().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_loader_with_production() {
        let config = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"regulation": {"max_retries": 5}}"#;

        let config = ConfigLoader::new()
            .with_string(json, "json")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.regulation.max_retries, 5);
        assert_eq!(config.regulation.find_time, 120);
    }

    #[test]
    fn test_loader_with_string_unsupported_format() {
        assert!(ConfigLoader::new().with_string("", "yaml").is_err());
    }

    #[test]
    fn test_loader_with_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [access_control]
            default_policy = "one_factor"

            [[access_control.rules]]
            domain = "public.example.com"
            policy = "bypass"
            "#
        )
        .unwrap();

        let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
        let acl = config.access_control.unwrap();
        assert_eq!(acl.default_policy, "one_factor");
        assert_eq!(acl.rules.len(), 1);
    }

    #[test]
    fn test_loader_with_file_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_loader_with_file_not_found() {
        let err = ConfigLoader::new()
            .with_file("/nonexistent/portcullis.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_loader_with_optional_file_not_found() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/portcullis.toml")
            .unwrap()
            .load()
            .unwrap();
        assert!(config.access_control.is_none());
    }

    #[test]
    fn test_loader_load_rejects_invalid_rules() {
        let toml = r#"
            [[access_control.rules]]
            domain = "example.com"
            policy = "two_factor"
            subject = "user:"
        "#;

        let err = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load()
            .unwrap_err();
        assert_eq!(err.field(), Some("access_control.rules[0].subject"));
    }

    #[test]
    fn test_loader_load_unvalidated_keeps_invalid_rules() {
        let toml = r#"
            [access_control]
            default_policy = "sometimes"
        "#;

        let config = ConfigLoader::new()
            .with_string(toml, "toml")
            .unwrap()
            .load_unvalidated()
            .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));

        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));

        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    // Process environment is shared between tests, so overrides are exercised
    // through apply_env_var directly.

    #[test]
    fn test_apply_env_var_regulation() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__REGULATION__MAX_RETRIES", "5", "TEST").unwrap();
        loader.apply_env_var("TEST__REGULATION__FIND_TIME", "60", "TEST").unwrap();
        loader.apply_env_var("TEST__REGULATION__BAN_TIME", "900", "TEST").unwrap();
        assert_eq!(loader.config.regulation.max_retries, 5);
        assert_eq!(loader.config.regulation.find_time, 60);
        assert_eq!(loader.config.regulation.ban_time, 900);
    }

    #[test]
    fn test_apply_env_var_invalid_integer() {
        let mut loader = ConfigLoader::new();
        let err = loader
            .apply_env_var("TEST__REGULATION__MAX_RETRIES", "three", "TEST")
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));
    }

    #[test]
    fn test_apply_env_var_default_policy_creates_section() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("TEST__ACCESS_CONTROL__DEFAULT_POLICY", "deny", "TEST")
            .unwrap();
        let acl = loader.config.access_control.unwrap();
        assert_eq!(acl.default_policy, "deny");
        assert!(acl.rules.is_empty());
    }

    #[test]
    fn test_apply_env_var_logging_and_metrics() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__LOGGING__LEVEL", "debug", "TEST").unwrap();
        loader.apply_env_var("TEST__LOGGING__FORMAT", "pretty", "TEST").unwrap();
        loader.apply_env_var("TEST__METRICS__ENABLED", "yes", "TEST").unwrap();
        loader.apply_env_var("TEST__METRICS__ADDR", "127.0.0.1:9100", "TEST").unwrap();
        assert_eq!(loader.config.logging.level, "debug");
        assert_eq!(loader.config.logging.format, LogFormat::Pretty);
        assert!(loader.config.metrics.enabled);
        assert_eq!(loader.config.metrics.addr, "127.0.0.1:9100");
    }

    #[test]
    fn test_apply_env_var_invalid_format() {
        let mut loader = ConfigLoader::new();
        assert!(loader.apply_env_var("TEST__LOGGING__FORMAT", "xml", "TEST").is_err());
    }

    #[test]
    fn test_apply_env_var_unknown_key_ignored() {
        let mut loader = ConfigLoader::new();
        loader.apply_env_var("TEST__SERVER__PORT", "8080", "TEST").unwrap();
        assert_eq!(loader.config, PortcullisConfig::default());
    }
}
