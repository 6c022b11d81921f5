//! Subject selectors.
//!
//! A rule may be restricted to one user (`user:<name>`) or to the members of
//! one group (`group:<name>`). Names are ASCII alphanumeric, the equivalent of
//! `^(user|group):[a-zA-Z0-9]+$`. Selectors are parsed once when the rule is
//! compiled, never per request.

use std::fmt;
use std::str::FromStr;

use portcullis_core::Subject;

use crate::error::AuthzError;

/// Who a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubjectSelector {
    /// Any subject, authenticated or not.
    #[default]
    Any,
    /// A single user.
    User(String),
    /// Every member of a group.
    Group(String),
}

impl SubjectSelector {
    /// Parses an optional selector. `None` selects any subject.
    pub fn parse(selector: Option<&str>) -> Result<Self, AuthzError> {
        selector.map_or(Ok(Self::Any), str::parse)
    }

    /// Returns `true` if `subject` is selected.
    pub fn matches(&self, subject: &Subject) -> bool {
        match self {
            Self::Any => true,
            Self::User(name) => subject.user == *name,
            Self::Group(name) => subject.in_group(name),
        }
    }
}

impl FromStr for SubjectSelector {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, name) = s
            .split_once(':')
            .ok_or_else(|| AuthzError::invalid_subject(s))?;

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AuthzError::invalid_subject(s));
        }

        match kind {
            "user" => Ok(Self::User(name.to_string())),
            "group" => Ok(Self::Group(name.to_string())),
            _ => Err(AuthzError::invalid_subject(s)),
        }
    }
}

impl fmt::Display for SubjectSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::User(name) => write!(f, "user:{name}"),
            Self::Group(name) => write!(f, "group:{name}"),
        }
    }
}
