//! Raw access control configuration as written by operators.
//!
//! These types carry strings exactly as they appear in the configuration
//! file. They are compiled into matchers by `portcullis-authz`, which is where
//! malformed selectors, patterns and networks are rejected.

use serde::{Deserialize, Serialize};

/// Ordered access control rules plus the policy used when none match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessControlConfig {
    /// Policy applied when no rule matches.
    #[serde(default = "default_policy")]
    pub default_policy: String,

    /// Rules in priority order: the first matching rule wins.
    #[serde(default)]
    pub rules: Vec<AccessRuleConfig>,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            default_policy: default_policy(),
            rules: Vec::new(),
        }
    }
}

impl AccessControlConfig {
    /// Creates a configuration with the given default policy and no rules.
    pub fn with_default_policy(policy: impl Into<String>) -> Self {
        Self {
            default_policy: policy.into(),
            rules: Vec::new(),
        }
    }

    /// Appends a rule at the lowest priority.
    pub fn rule(mut self, rule: AccessRuleConfig) -> Self {
        self.rules.push(rule);
        self
    }
}

/// One access control entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessRuleConfig {
    /// Domain pattern: an exact domain or `*.` followed by a parent domain.
    pub domain: String,

    /// Policy name: `deny`, `bypass`, `one_factor` or `two_factor`.
    pub policy: String,

    /// Regular expressions matched against the resource path. Absent means
    /// every resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,

    /// `user:<name>` or `group:<name>`. Absent means any subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// CIDR ranges the source address must fall in. Absent means any network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<String>>,
}

impl AccessRuleConfig {
    /// Creates a rule covering every resource, subject and network of `domain`.
    pub fn new(domain: impl Into<String>, policy: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            policy: policy.into(),
            resources: None,
            subject: None,
            networks: None,
        }
    }

    /// Restricts the rule to resources matching any of `patterns`.
    pub fn resources<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the rule to a subject selector.
    pub fn subject(mut self, selector: impl Into<String>) -> Self {
        self.subject = Some(selector.into());
        self
    }

    /// Restricts the rule to source addresses inside any of `networks`.
    pub fn networks<I, S>(mut self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.networks = Some(networks.into_iter().map(Into::into).collect());
        self
    }
}

fn default_policy() -> String {
    "bypass".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_bypass() {
        let config: AccessControlConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.default_policy, "bypass");
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_rule_builder() {
        let config = AccessControlConfig::with_default_policy("deny").rule(
            AccessRuleConfig::new("*.example.com", "two_factor")
                .resources(["^/admin/.*"])
                .subject("group:admins")
                .networks(["10.0.0.0/8"]),
        );

        let rule = &config.rules[0];
        assert_eq!(rule.domain, "*.example.com");
        assert_eq!(rule.resources.as_deref(), Some(&["^/admin/.*".to_string()][..]));
        assert_eq!(rule.subject.as_deref(), Some("group:admins"));
        assert_eq!(rule.networks.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_rule_rejects_unknown_fields() {
        let result: Result<AccessRuleConfig, _> =
            serde_json::from_str(r#"{"domain":"a.com","policy":"deny","method":"GET"}"#);
        assert!(result.is_err());
    }
}
