//! The authorization engine.
//!
//! Rules are tried in the order they were declared and the first one that
//! matches decides the level. Operators therefore list the most specific
//! rules first. When nothing matches, the configured default policy applies.

use std::net::IpAddr;

use portcullis_core::{AccessControlConfig, AccessObject, Level, Subject};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{AuthzError, AuthzResult};
use crate::rule::AccessRule;

/// Outcome of an authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Required authentication level.
    pub level: Level,
    /// Index of the rule that decided, or `None` for the default policy and
    /// for the unrestricted engine.
    pub rule_index: Option<usize>,
}

#[derive(Debug, Clone)]
struct AccessControlList {
    rules: Vec<AccessRule>,
    default_level: Level,
}

/// Maps a request to the authentication level it requires.
///
/// The engine is immutable once built and can be shared between request
/// handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AuthorizationEngine {
    acl: Option<AccessControlList>,
}

impl AuthorizationEngine {
    /// Builds an engine from an optional configuration.
    ///
    /// `None` yields the unrestricted engine, which answers
    /// [`Level::Bypass`] for every request.
    pub fn new(config: Option<&AccessControlConfig>) -> AuthzResult<Self> {
        config.map_or_else(|| Ok(Self::unrestricted()), Self::from_config)
    }

    /// Builds an engine that requires nothing of anyone.
    pub fn unrestricted() -> Self {
        info!("no access control configured, every request is bypassed");
        Self { acl: None }
    }

    /// Compiles the rule list of `config`.
    pub fn from_config(config: &AccessControlConfig) -> AuthzResult<Self> {
        let rules = config
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| AccessRule::compile(rule).map_err(|e| e.in_rule(index)))
            .collect::<Result<Vec<_>, AuthzError>>()?;

        let default_level = Level::from_policy_name(&config.default_policy);
        if default_level == Level::Deny && config.default_policy != "deny" {
            warn!(
                default_policy = %config.default_policy,
                "default policy not recognized, denying"
            );
        }

        info!(
            rules = rules.len(),
            default_policy = %default_level,
            "access control loaded"
        );

        Ok(Self {
            acl: Some(AccessControlList {
                rules,
                default_level,
            }),
        })
    }

    /// Returns the level required for `subject` to reach `object` from `source`.
    pub fn authorize(&self, object: &AccessObject, subject: &Subject, source: IpAddr) -> Level {
        self.decide(object, subject, source).level
    }

    /// Returns the index of the rule that decides the request, if any.
    pub fn matching_rule(
        &self,
        object: &AccessObject,
        subject: &Subject,
        source: IpAddr,
    ) -> Option<usize> {
        self.decide(object, subject, source).rule_index
    }

    /// Decides a request and reports which rule did so.
    #[instrument(level = "trace", skip(self, subject), fields(
        domain = %object.domain,
        resource = %object.resource,
        user = %subject.user,
    ))]
    pub fn decide(&self, object: &AccessObject, subject: &Subject, source: IpAddr) -> Decision {
        let Some(acl) = &self.acl else {
            return Decision {
                level: Level::Bypass,
                rule_index: None,
            };
        };

        let matched = acl
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(object, subject, source));

        match matched {
            Some((index, rule)) => {
                debug!(
                    rule_index = index,
                    rule_domain = %rule.domain(),
                    rule_subject = %rule.subject(),
                    level = %rule.level(),
                    "access rule matched"
                );
                Decision {
                    level: rule.level(),
                    rule_index: Some(index),
                }
            }
            None => {
                trace!(level = %acl.default_level, "no rule matched, applying default policy");
                Decision {
                    level: acl.default_level,
                    rule_index: None,
                }
            }
        }
    }

    /// Returns `true` if no access control was configured.
    pub fn is_unrestricted(&self) -> bool {
        self.acl.is_none()
    }

    /// Number of compiled rules.
    pub fn rule_count(&self) -> usize {
        self.acl.as_ref().map_or(0, |acl| acl.rules.len())
    }
}
