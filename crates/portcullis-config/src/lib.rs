//! Typed configuration for Portcullis.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! Loading compiles every access control rule, so a malformed subject, regular
//! expression or network is reported with its position before the gateway
//! starts serving requests.
//!
//! # Example
//!
//! ```no_run
//! use portcullis_config::ConfigLoader;
//!
//! # fn main() -> Result<(), portcullis_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_file("/etc/portcullis/config.toml")?
//!     .with_env_prefix("PORTCULLIS")
//!     .load()?;
//!
//! let engine = config.authorization_engine()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [access_control]
//! default_policy = "deny"
//!
//! [[access_control.rules]]
//! domain = "public.example.com"
//! policy = "bypass"
//!
//! [[access_control.rules]]
//! domain = "*.mail.example.com"
//! policy = "two_factor"
//! subject = "group:admins"
//! resources = ["^/admin/.*"]
//! networks = ["10.0.0.0/8"]
//!
//! [regulation]
//! max_retries = 3
//! find_time = 120
//! ban_time = 300
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [metrics]
//! enabled = false
//! addr = "0.0.0.0:9090"
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `PORTCULLIS__ACCESS_CONTROL__DEFAULT_POLICY=deny`
//! - `PORTCULLIS__REGULATION__MAX_RETRIES=5`
//! - `PORTCULLIS__REGULATION__FIND_TIME=60`
//! - `PORTCULLIS__REGULATION__BAN_TIME=900`
//! - `PORTCULLIS__LOGGING__LEVEL=debug`
//! - `PORTCULLIS__LOGGING__FORMAT=pretty`
//! - `PORTCULLIS__METRICS__ENABLED=true`
//! - `PORTCULLIS__METRICS__ADDR=0.0.0.0:9100`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
