//! Authentication traces and regulation tuning.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One recorded first-factor attempt.
///
/// Traces are append-only: they are created once per completed attempt and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationTrace {
    /// The user the attempt was made for.
    pub user_id: String,
    /// When the attempt completed.
    pub timestamp: DateTime<Utc>,
    /// Whether the attempt succeeded.
    pub succeeded: bool,
}

impl AuthenticationTrace {
    /// Creates a trace.
    pub fn new(user_id: impl Into<String>, timestamp: DateTime<Utc>, succeeded: bool) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp,
            succeeded,
        }
    }
}

/// Tuning of the brute-force guard.
///
/// `find_time` and `ban_time` are in seconds. A `max_retries` of zero turns
/// regulation off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegulationParameters {
    /// Number of consecutive failures that can trigger a ban.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Span, in seconds, within which the failures must fall to count as a burst.
    #[serde(default = "default_find_time")]
    pub find_time: u64,
    /// Cool-down, in seconds, after the latest failure during which the ban holds.
    #[serde(default = "default_ban_time")]
    pub ban_time: u64,
}

impl Default for RegulationParameters {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            find_time: default_find_time(),
            ban_time: default_ban_time(),
        }
    }
}

impl RegulationParameters {
    /// Creates parameters from explicit values.
    pub const fn new(max_retries: u32, find_time: u64, ban_time: u64) -> Self {
        Self {
            max_retries,
            find_time,
            ban_time,
        }
    }

    /// Parameters that never regulate.
    pub const fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns `true` when regulation is turned on.
    pub const fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// `find_time` as a duration.
    pub fn find_window(&self) -> Duration {
        seconds(self.find_time)
    }

    /// `ban_time` as a duration.
    pub fn ban_duration(&self) -> Duration {
        seconds(self.ban_time)
    }
}

// Values beyond i64::MAX seconds saturate rather than wrap.
fn seconds(value: u64) -> Duration {
    let secs = i64::try_from(value).unwrap_or(i64::MAX);
    Duration::try_seconds(secs).unwrap_or(Duration::MAX)
}

fn default_max_retries() -> u32 {
    3
}

fn default_find_time() -> u64 {
    120
}

fn default_ban_time() -> u64 {
    300
}
