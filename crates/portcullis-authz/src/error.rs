//! Error types for the authorization crate.

use thiserror::Error;

/// Result type for authorization operations.
pub type AuthzResult<T> = Result<T, AuthzError>;

/// Errors raised while compiling access control rules.
///
/// Deciding a request never fails; every variant here is a configuration
/// problem detected when the engine is built.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthzError {
    /// Domain pattern is empty.
    #[error("invalid domain pattern '{domain}': {reason}")]
    InvalidDomain {
        /// The rejected pattern.
        domain: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Subject selector is not `user:<name>` or `group:<name>`.
    #[error("invalid subject '{selector}': expected user:<name> or group:<name>")]
    InvalidSubject {
        /// The rejected selector.
        selector: String,
    },

    /// A resource pattern is not a valid regular expression.
    #[error("invalid resource pattern '{pattern}': {source}")]
    InvalidResourcePattern {
        /// The rejected pattern.
        pattern: String,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A network entry is neither an address nor a CIDR range.
    #[error("invalid network '{network}': {source}")]
    InvalidNetwork {
        /// The rejected entry.
        network: String,
        /// Address parse error.
        #[source]
        source: ipnet::AddrParseError,
    },

    /// A rule failed to compile.
    #[error("access control rule #{index}: {source}")]
    Rule {
        /// Zero-based position of the rule in the configured list.
        index: usize,
        /// What was wrong with it.
        #[source]
        source: Box<AuthzError>,
    },
}

impl AuthzError {
    /// Create an invalid subject error.
    pub fn invalid_subject(selector: impl Into<String>) -> Self {
        Self::InvalidSubject {
            selector: selector.into(),
        }
    }

    /// Attach the position of the failing rule.
    pub fn in_rule(self, index: usize) -> Self {
        Self::Rule {
            index,
            source: Box::new(self),
        }
    }

    /// Returns the rule index, if the error was raised by a specific rule.
    pub const fn rule_index(&self) -> Option<usize> {
        match self {
            Self::Rule { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the configuration field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDomain { .. } => "domain",
            Self::InvalidSubject { .. } => "subject",
            Self::InvalidResourcePattern { .. } => "resources",
            Self::InvalidNetwork { .. } => "networks",
            Self::Rule { source, .. } => source.field(),
        }
    }
}
