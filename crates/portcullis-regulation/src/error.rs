//! Error types for the regulation crate.

use chrono::{DateTime, Utc};
use portcullis_core::PortcullisError;
use thiserror::Error;

/// Result type for regulation checks.
pub type RegulationResult<T> = Result<T, RegulationError>;

/// Result type for trace store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the authentication trace store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store could not be reached.
    #[error("trace store unavailable: {0}")]
    Unavailable(String),

    /// The store backend reported an error.
    #[error("trace store error: {message}")]
    Backend {
        /// What the store was doing.
        message: String,
        /// Backend error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Create a backend error.
    pub fn backend(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source: source.into(),
        }
    }
}

/// Outcome of a regulation check that did not allow the attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegulationError {
    /// Too many recent failures: the user is locked out until `until`.
    #[error("user {user} is regulated until {until}")]
    Regulated {
        /// The regulated user.
        user: String,
        /// When the lockout clears.
        until: DateTime<Utc>,
    },

    /// The trace store failed; no decision could be made.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegulationError {
    /// Create a lockout error.
    pub fn regulated(user: impl Into<String>, until: DateTime<Utc>) -> Self {
        Self::Regulated {
            user: user.into(),
            until,
        }
    }

    /// Check if this is a lockout rather than a store failure.
    pub const fn is_regulated(&self) -> bool {
        matches!(self, Self::Regulated { .. })
    }

    /// Whole seconds from `now` until the lockout clears, rounded up.
    ///
    /// `None` for store failures.
    pub fn retry_after(&self, now: DateTime<Utc>) -> Option<u64> {
        match self {
            Self::Regulated { until, .. } => {
                let remaining = until.signed_duration_since(now);
                let mut secs = remaining.num_seconds();
                if remaining.subsec_nanos() > 0 {
                    secs += 1;
                }
                Some(u64::try_from(secs).unwrap_or(0))
            }
            Self::Store(_) => None,
        }
    }

    /// Convert into the classified error served to clients.
    pub fn into_portcullis_error(self, now: DateTime<Utc>) -> PortcullisError {
        let retry_after = self.retry_after(now);
        let message = self.to_string();
        match self {
            Self::Regulated { .. } => PortcullisError::regulated(message, retry_after),
            Self::Store(err) => PortcullisError::storage("authentication trace store failed", err),
        }
    }
}

impl From<StoreError> for PortcullisError {
    fn from(err: StoreError) -> Self {
        Self::storage("authentication trace store failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_regulated_error() {
        let err = RegulationError::regulated("john", at(45));
        assert!(err.is_regulated());
        assert!(err.to_string().contains("john"));
        assert_eq!(err.retry_after(at(39)), Some(6));
        assert_eq!(err.retry_after(at(50)), Some(0));
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let err = RegulationError::regulated("john", at(45));
        let now = at(39) + Duration::milliseconds(500);
        assert_eq!(err.retry_after(now), Some(6));
    }

    #[test]
    fn test_store_error_is_not_regulated() {
        let err = RegulationError::from(StoreError::Unavailable("connection refused".to_string()));
        assert!(!err.is_regulated());
        assert_eq!(err.retry_after(at(0)), None);
        assert_eq!(err.to_string(), "trace store unavailable: connection refused");
    }

    #[test]
    fn test_into_portcullis_error() {
        let regulated = RegulationError::regulated("john", at(45)).into_portcullis_error(at(40));
        assert!(regulated.is_regulated());
        assert_eq!(regulated.retry_after_seconds(), Some(5));

        let store = RegulationError::from(StoreError::Unavailable("down".to_string()))
            .into_portcullis_error(at(40));
        assert_eq!(store.category(), portcullis_core::ErrorCategory::Storage);
    }
}
