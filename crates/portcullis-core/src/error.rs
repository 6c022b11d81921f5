//! Classified errors for the layer that serves the gateway's decisions.
//!
//! Each crate in the workspace has its own error enum. [`PortcullisError`] is
//! the common shape they are converted into before reaching the HTTP layer,
//! so that a lockout, a store outage and a broken configuration map to three
//! distinct responses.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`PortcullisError`].
pub type PortcullisResult<T> = Result<T, PortcullisError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid access control or regulation configuration.
    Configuration,
    /// The user is temporarily locked out by the brute-force guard.
    Regulated,
    /// The authentication trace store failed.
    Storage,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Regulated => StatusCode::TOO_MANY_REQUESTS,
            Self::Storage => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Standard error type surfaced by the Portcullis facade.
#[derive(Error, Debug)]
pub enum PortcullisError {
    /// Configuration was rejected.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Human-readable error message.
        message: String,
    },

    /// The user is locked out.
    #[error("Regulated: {message}")]
    Regulated {
        /// Human-readable error message.
        message: String,
        /// Seconds until the lockout clears.
        retry_after_seconds: Option<u64>,
    },

    /// The trace store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message.
        message: String,
        /// The underlying error (not exposed to clients).
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortcullisError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a regulation error.
    #[must_use]
    pub fn regulated(message: impl Into<String>, retry_after_seconds: Option<u64>) -> Self {
        Self::Regulated {
            message: message.into(),
            retry_after_seconds,
        }
    }

    /// Creates a storage error wrapping its cause.
    pub fn storage(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Regulated { .. } => ErrorCategory::Regulated,
            Self::Storage { .. } => ErrorCategory::Storage,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns the `Retry-After` value in seconds for a lockout.
    pub const fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            Self::Regulated {
                retry_after_seconds,
                ..
            } => *retry_after_seconds,
            _ => None,
        }
    }

    /// Returns `true` if this is a lockout rather than a failure.
    pub const fn is_regulated(&self) -> bool {
        matches!(self, Self::Regulated { .. })
    }
}
