//! The protected object and the identity requesting it.

use serde::{Deserialize, Serialize};

/// The thing being protected: a domain and a resource path on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessObject {
    /// Request domain, e.g. `mx1.mail.example.com`.
    pub domain: String,
    /// Request path, e.g. `/my/private/resource`.
    pub resource: String,
}

impl AccessObject {
    /// Creates an object for the given domain and resource.
    pub fn new(domain: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            resource: resource.into(),
        }
    }
}

/// The identity making a request.
///
/// An unauthenticated caller is represented by [`Subject::anonymous`], whose
/// user name is empty and which belongs to no group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// User identifier.
    pub user: String,
    /// Groups the user belongs to. Order carries no meaning.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Subject {
    /// Creates a subject with no groups.
    pub fn user(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            groups: Vec::new(),
        }
    }

    /// Creates a subject with the given groups.
    pub fn with_groups<I, S>(user: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user: user.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// The subject of a request that carries no identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns `true` if the subject is a member of `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}
