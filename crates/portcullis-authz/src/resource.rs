//! Resource (path) matching.

use regex::Regex;

use crate::error::{AuthzError, AuthzResult};

/// Compiled resource patterns of one rule.
///
/// Patterns are searched, not anchored: `/private` matches `/my/private/x`.
/// Authors add `^` and `$` themselves when they want anchoring.
#[derive(Debug, Clone, Default)]
pub struct ResourceMatcher {
    patterns: Vec<Regex>,
}

impl ResourceMatcher {
    /// Compiles the rule's resource list. `None` and an empty list both match
    /// every resource.
    pub fn compile(patterns: Option<&[String]>) -> AuthzResult<Self> {
        let patterns = patterns
            .unwrap_or_default()
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| AuthzError::InvalidResourcePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<AuthzResult<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Returns `true` if any pattern matches `resource`.
    pub fn matches(&self, resource: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|re| re.is_match(resource))
    }

    /// Returns `true` if this matcher accepts every resource.
    pub fn is_wildcard(&self) -> bool {
        self.patterns.is_empty()
    }
}
