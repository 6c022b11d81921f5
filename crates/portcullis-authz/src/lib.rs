//! Portcullis Authorization - ordered access control rules
//!
//! This crate decides which authentication level a request needs before the
//! gateway forwards it to a protected application.
//!
//! # Overview
//!
//! Each rule combines four matchers, all of which must accept the request:
//! - [`DomainPattern`]: exact domain or `*.parent` wildcard
//! - [`ResourceMatcher`]: regular expressions searched in the path
//! - [`SubjectSelector`]: `user:<name>` or `group:<name>`
//! - [`NetworkMatcher`]: CIDR ranges for the source address
//!
//! # Architecture
//!
//! ```text
//!   AccessControlConfig ──compile──▶ AuthorizationEngine
//!                                    ┌───────────────────────────┐
//!   (object, subject, ip) ─────────▶ │ rule 0 ─ rule 1 ─ … ─ n   │
//!                                    │ first match wins          │
//!                                    │ else default_policy       │
//!                                    └─────────────┬─────────────┘
//!                                                  ▼
//!                                  Level (bypass / one_factor /
//!                                         two_factor / deny)
//! ```
//!
//! # Example
//!
//! ```
//! use portcullis_authz::AuthorizationEngine;
//! use portcullis_core::{AccessControlConfig, AccessObject, AccessRuleConfig, Level, Subject};
//!
//! let config = AccessControlConfig::with_default_policy("deny")
//!     .rule(AccessRuleConfig::new("*.mail.example.com", "two_factor"));
//! let engine = AuthorizationEngine::from_config(&config)?;
//!
//! let level = engine.authorize(
//!     &AccessObject::new("mx1.mail.example.com", "/"),
//!     &Subject::user("john"),
//!     "192.168.0.10".parse().unwrap(),
//! );
//! assert_eq!(level, Level::TwoFactor);
//! # Ok::<(), portcullis_authz::AuthzError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod domain;
pub mod engine;
pub mod error;
pub mod network;
pub mod resource;
pub mod rule;
pub mod subject;

// Re-exports for convenience
pub use domain::DomainPattern;
pub use engine::{AuthorizationEngine, Decision};
pub use error::{AuthzError, AuthzResult};
pub use network::NetworkMatcher;
pub use resource::ResourceMatcher;
pub use rule::AccessRule;
pub use subject::SubjectSelector;
