//! # Portcullis Core
//!
//! Shared value types for the Portcullis decision core.
//!
//! This crate provides the types exchanged between the authorization engine,
//! the regulation engine and the HTTP layer that sits in front of them:
//!
//! - [`Level`] - Required authentication level for a request
//! - [`Policy`] - Policy name as written in an access control rule
//! - [`AccessObject`] - The domain and resource being protected
//! - [`Subject`] - The user and groups making the request
//! - [`AuthenticationTrace`] - One recorded first-factor attempt
//! - [`RegulationParameters`] - Brute-force guard tuning
//! - [`AccessControlConfig`] - Raw, ordered access control rules
//! - [`PortcullisError`] - Classified error for the HTTP layer

#![doc(html_root_url = "https://docs.rs/portcullis-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod acl;
mod error;
mod level;
mod request;
mod trace;

pub use acl::{AccessControlConfig, AccessRuleConfig};
pub use error::{ErrorCategory, PortcullisError, PortcullisResult};
pub use level::{Level, Policy, UnknownPolicy};
pub use request::{AccessObject, Subject};
pub use trace::{AuthenticationTrace, RegulationParameters};
