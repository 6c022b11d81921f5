//! Property tests for domain matching and rule precedence.

use std::net::IpAddr;

use portcullis_authz::{domain, AuthorizationEngine, DomainPattern};
use portcullis_core::{AccessControlConfig, AccessObject, AccessRuleConfig, Level, Policy, Subject};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}"
}

fn domain_name() -> impl Strategy<Value = String> {
    prop::collection::vec(label(), 1..4).prop_map(|labels| labels.join("."))
}

fn policy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(Policy::NAMES.to_vec())
}

proptest! {
    #[test]
    fn wildcard_matches_iff_dotted_suffix(parent in domain_name(), actual in domain_name()) {
        let pattern = format!("*.{}", parent);
        let expected = actual.ends_with(&format!(".{parent}"));
        prop_assert_eq!(domain::matches(&actual, &pattern), expected);
        prop_assert_eq!(DomainPattern::parse(&pattern).unwrap().matches(&actual), expected);
    }

    #[test]
    fn wildcard_never_matches_parent(parent in domain_name()) {
        let pattern = format!("*.{parent}");
        prop_assert!(!domain::matches(&parent, &pattern));
    }

    #[test]
    fn wildcard_matches_any_child(parent in domain_name(), child in label()) {
        let actual = format!("{child}.{parent}");
        let pattern = format!("*.{parent}");
        prop_assert!(domain::matches(&actual, &pattern));
    }

    #[test]
    fn first_matching_rule_decides(
        policies in prop::collection::vec(policy(), 1..8),
        first_match in 0usize..8,
        default in policy(),
    ) {
        let first_match = first_match % policies.len();

        // Rules before `first_match` target another domain; the rest all match.
        let mut config = AccessControlConfig::with_default_policy(default);
        for (index, policy) in policies.iter().enumerate() {
            let domain = if index < first_match { "other.example.com" } else { "*.example.com" };
            config = config.rule(AccessRuleConfig::new(domain, *policy));
        }
        let engine = AuthorizationEngine::from_config(&config).unwrap();

        let source: IpAddr = "10.0.0.1".parse().unwrap();
        let decision = engine.decide(
            &AccessObject::new("app.example.com", "/"),
            &Subject::user("john"),
            source,
        );

        prop_assert_eq!(decision.rule_index, Some(first_match));
        prop_assert_eq!(decision.level, Level::from_policy_name(policies[first_match]));
    }

    #[test]
    fn default_applies_when_nothing_matches(
        policies in prop::collection::vec(policy(), 0..6),
        default in policy(),
    ) {
        let mut config = AccessControlConfig::with_default_policy(default);
        for policy in &policies {
            config = config.rule(AccessRuleConfig::new("*.example.org", *policy));
        }
        let engine = AuthorizationEngine::from_config(&config).unwrap();

        let level = engine.authorize(
            &AccessObject::new("app.example.com", "/"),
            &Subject::anonymous(),
            "::1".parse().unwrap(),
        );
        prop_assert_eq!(level, Level::from_policy_name(default));
    }
}
