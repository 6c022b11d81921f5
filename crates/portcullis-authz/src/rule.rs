//! Compiled access control rules.

use std::net::IpAddr;

use portcullis_core::{AccessObject, AccessRuleConfig, Level, Policy, Subject};
use tracing::warn;

use crate::domain::DomainPattern;
use crate::error::AuthzResult;
use crate::network::NetworkMatcher;
use crate::resource::ResourceMatcher;
use crate::subject::SubjectSelector;

/// One access control entry, ready to be matched.
#[derive(Debug, Clone)]
pub struct AccessRule {
    domain: DomainPattern,
    resources: ResourceMatcher,
    subject: SubjectSelector,
    networks: NetworkMatcher,
    level: Level,
}

impl AccessRule {
    /// Compiles a rule from its configuration.
    ///
    /// Malformed selectors, patterns and networks are rejected. An unknown
    /// policy name is accepted and compiles to [`Level::Deny`].
    pub fn compile(config: &AccessRuleConfig) -> AuthzResult<Self> {
        let level = match config.policy.parse::<Policy>() {
            Ok(policy) => Level::from(policy),
            Err(err) => {
                warn!(domain = %config.domain, error = %err, "rule policy not recognized, denying");
                Level::Deny
            }
        };

        Ok(Self {
            domain: DomainPattern::parse(&config.domain)?,
            resources: ResourceMatcher::compile(config.resources.as_deref())?,
            subject: SubjectSelector::parse(config.subject.as_deref())?,
            networks: NetworkMatcher::compile(config.networks.as_deref())?,
            level,
        })
    }

    /// Returns `true` when domain, resource, subject and network all match.
    pub fn matches(&self, object: &AccessObject, subject: &Subject, source: IpAddr) -> bool {
        self.domain.matches(&object.domain)
            && self.resources.matches(&object.resource)
            && self.subject.matches(subject)
            && self.networks.matches(source)
    }

    /// The level this rule grants when it matches.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The rule's domain pattern.
    pub const fn domain(&self) -> &DomainPattern {
        &self.domain
    }

    /// The rule's subject selector.
    pub const fn subject(&self) -> &SubjectSelector {
        &self.subject
    }
}
