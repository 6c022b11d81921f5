//! Authentication levels and the policy names that select them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication level required to access a resource.
///
/// Variants are declared from the weakest restriction to the strongest. The
/// authorization engine never ranks levels against each other: rule order
/// alone decides which level applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    /// No authentication required.
    Bypass,
    /// A valid first factor (password) is required.
    OneFactor,
    /// Both the first and a second factor are required.
    TwoFactor,
    /// Access is refused whatever the authentication state.
    Deny,
}

impl Level {
    /// Maps a policy name to a level.
    ///
    /// Unknown names map to [`Level::Deny`] so a typo in a rule can never
    /// open access.
    pub fn from_policy_name(name: &str) -> Self {
        name.parse::<Policy>().map_or(Self::Deny, Self::from)
    }

    /// Returns the label used in logs and metrics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bypass => "bypass",
            Self::OneFactor => "one_factor",
            Self::TwoFactor => "two_factor",
            Self::Deny => "deny",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Policy> for Level {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Deny => Self::Deny,
            Policy::Bypass => Self::Bypass,
            Policy::OneFactor => Self::OneFactor,
            Policy::TwoFactor => Self::TwoFactor,
        }
    }
}

/// A policy name as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// `deny`
    Deny,
    /// `bypass`
    Bypass,
    /// `one_factor`
    OneFactor,
    /// `two_factor`
    TwoFactor,
}

impl Policy {
    /// Every accepted policy name, in declaration order.
    pub const NAMES: [&'static str; 4] = ["deny", "bypass", "one_factor", "two_factor"];
}

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy '{0}', expected one of deny, bypass, one_factor, two_factor")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deny" => Ok(Self::Deny),
            "bypass" => Ok(Self::Bypass),
            "one_factor" => Ok(Self::OneFactor),
            "two_factor" => Ok(Self::TwoFactor),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Level::from(*self).fmt(f)
    }
}
