//! Domain pattern matching.
//!
//! A pattern is either an exact domain or a wildcard starting with `*`. The
//! wildcard keeps everything after the star, separating dot included, so
//! `*.mail.example.com` matches `mx1.mail.example.com` but not
//! `mail.example.com` itself.

use std::fmt;

use crate::error::{AuthzError, AuthzResult};

/// A parsed domain pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPattern {
    /// Matches one domain, byte for byte.
    Exact(String),
    /// Matches any domain ending with the stored suffix.
    Wildcard(String),
}

impl DomainPattern {
    /// Parses a pattern from configuration.
    pub fn parse(pattern: &str) -> AuthzResult<Self> {
        if pattern.is_empty() {
            return Err(AuthzError::InvalidDomain {
                domain: pattern.to_string(),
                reason: "domain must not be empty".to_string(),
            });
        }

        Ok(match pattern.strip_prefix('*') {
            Some(suffix) => Self::Wildcard(suffix.to_string()),
            None => Self::Exact(pattern.to_string()),
        })
    }

    /// Returns `true` if `domain` is covered by this pattern.
    pub fn matches(&self, domain: &str) -> bool {
        match self {
            Self::Exact(expected) => domain == expected,
            Self::Wildcard(suffix) => domain.ends_with(suffix.as_str()),
        }
    }
}

impl fmt::Display for DomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(domain) => f.write_str(domain),
            Self::Wildcard(suffix) => write!(f, "*{suffix}"),
        }
    }
}

/// Tests `actual` against a raw, unparsed pattern.
pub fn matches(actual: &str, pattern: &str) -> bool {
    match pattern.strip_prefix('*') {
        Some(suffix) => actual.ends_with(suffix),
        None => actual == pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let pattern = DomainPattern::parse("home.example.com").unwrap();
        assert!(pattern.matches("home.example.com"));
        assert!(!pattern.matches("www.home.example.com"));
        assert!(!pattern.matches("home.example.co"));
    }

    #[test]
    fn test_wildcard_matches_subdomains_only() {
        let pattern = DomainPattern::parse("*.mail.example.com").unwrap();
        assert!(pattern.matches("mx1.mail.example.com"));
        assert!(pattern.matches("a.b.mail.example.com"));
        assert!(!pattern.matches("mail.example.com"));
        assert!(!pattern.matches("example.com"));
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        assert!(!matches("Home.example.com", "home.example.com"));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(DomainPattern::parse("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["*.example.com", "secure.example.com"] {
            assert_eq!(DomainPattern::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_raw_matches_agrees_with_parsed() {
        let cases = [
            ("mx1.mail.example.com", "*.mail.example.com"),
            ("mail.example.com", "*.mail.example.com"),
            ("public.example.com", "public.example.com"),
            ("public.example.com", "secure.example.com"),
        ];
        for (actual, pattern) in cases {
            let parsed = DomainPattern::parse(pattern).unwrap();
            assert_eq!(matches(actual, pattern), parsed.matches(actual));
        }
    }
}
