//! Source network matching.

use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::{AuthzError, AuthzResult};

/// Compiled network ranges of one rule.
#[derive(Debug, Clone, Default)]
pub struct NetworkMatcher {
    networks: Vec<IpNet>,
}

impl NetworkMatcher {
    /// Parses the rule's network list. `None` and an empty list both match
    /// every address.
    ///
    /// Entries are CIDR ranges; a bare address is taken as a single-host range.
    pub fn compile(networks: Option<&[String]>) -> AuthzResult<Self> {
        let networks = networks
            .unwrap_or_default()
            .iter()
            .map(|entry| parse_network(entry))
            .collect::<AuthzResult<Vec<_>>>()?;

        Ok(Self { networks })
    }

    /// Returns `true` if `source` lies in any of the ranges.
    pub fn matches(&self, source: IpAddr) -> bool {
        if self.networks.is_empty() {
            return true;
        }
        let source = canonical(source);
        self.networks.iter().any(|net| net.contains(&source))
    }

    /// Returns `true` if this matcher accepts every address.
    pub fn is_wildcard(&self) -> bool {
        self.networks.is_empty()
    }
}

fn parse_network(entry: &str) -> AuthzResult<IpNet> {
    entry.parse::<IpNet>().or_else(|source| {
        entry
            .parse::<IpAddr>()
            .map(IpNet::from)
            .map_err(|_| AuthzError::InvalidNetwork {
                network: entry.to_string(),
                source,
            })
    })
}

// Dual-stack listeners report IPv4 peers as ::ffff:a.b.c.d.
fn canonical(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(addr, IpAddr::V4),
        IpAddr::V4(_) => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(networks: &[&str]) -> NetworkMatcher {
        let owned: Vec<String> = networks.iter().map(ToString::to_string).collect();
        NetworkMatcher::compile(Some(&owned)).unwrap()
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_absent_matches_everything() {
        let m = NetworkMatcher::compile(None).unwrap();
        assert!(m.is_wildcard());
        assert!(m.matches(ip("8.8.8.8")));
        assert!(m.matches(ip("::1")));
    }

    #[test]
    fn test_cidr_containment() {
        let m = matcher(&["10.0.0.0/8"]);
        assert!(m.matches(ip("10.1.3.0")));
        assert!(!m.matches(ip("11.1.3.0")));
    }

    #[test]
    fn test_any_network_matches() {
        let m = matcher(&["192.168.1.0/24", "10.0.0.0/8"]);
        assert!(m.matches(ip("192.168.1.20")));
        assert!(m.matches(ip("10.200.0.1")));
        assert!(!m.matches(ip("192.168.2.20")));
    }

    #[test]
    fn test_bare_address_is_single_host() {
        let m = matcher(&["192.168.0.5"]);
        assert!(m.matches(ip("192.168.0.5")));
        assert!(!m.matches(ip("192.168.0.6")));
    }

    #[test]
    fn test_ipv6_ranges() {
        let m = matcher(&["fd00::/8"]);
        assert!(m.matches(ip("fd12:3456::1")));
        assert!(!m.matches(ip("2001:db8::1")));
    }

    #[test]
    fn test_ipv4_mapped_source() {
        let m = matcher(&["10.0.0.0/8"]);
        assert!(m.matches(ip("::ffff:10.1.2.3")));
    }

    #[test]
    fn test_invalid_network_rejected() {
        let networks = vec!["10.0.0.0/33".to_string()];
        assert!(NetworkMatcher::compile(Some(&networks)).is_err());

        let networks = vec!["not-an-ip".to_string()];
        let err = NetworkMatcher::compile(Some(&networks)).unwrap_err();
        assert!(err.to_string().contains("not-an-ip"));
    }
}
