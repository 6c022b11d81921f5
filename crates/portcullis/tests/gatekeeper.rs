//! End-to-end decisions through the facade, from a TOML document.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use portcullis::prelude::*;
use portcullis::regulation::ManualClock;

const CONFIG: &str = r#"
[access_control]
default_policy = "deny"

[[access_control.rules]]
domain = "public.example.com"
policy = "bypass"
networks = ["10.0.0.0/8"]

[[access_control.rules]]
domain = "*.mail.example.com"
policy = "two_factor"

[[access_control.rules]]
domain = "home.example.com"
policy = "one_factor"
resources = ["/my/private/resource"]

[[access_control.rules]]
domain = "home.example.com"
policy = "deny"
resources = ["^/my/private/.*"]

[[access_control.rules]]
domain = "home.example.com"
policy = "two_factor"
resources = ["^/my/.*"]

[[access_control.rules]]
domain = "admin.example.com"
policy = "two_factor"
subject = "group:admins"

[regulation]
max_retries = 3
find_time = 60
ban_time = 30
"#;

fn load() -> PortcullisConfig {
    ConfigLoader::new()
        .with_string(CONFIG, "toml")
        .unwrap()
        .load()
        .unwrap()
}

fn ip(addr: &str) -> IpAddr {
    addr.parse().unwrap()
}

fn gatekeeper() -> Gatekeeper {
    Gatekeeper::from_config(&load(), Arc::new(MemoryTraceStore::new())).unwrap()
}

fn gatekeeper_with_clock() -> (Arc<ManualClock>, Gatekeeper) {
    let config = load();
    let clock = Arc::new(ManualClock::at_epoch());
    let regulator = Regulator::with_clock(
        config.regulation,
        Arc::new(MemoryTraceStore::new()),
        clock.clone(),
    );
    let gatekeeper = Gatekeeper::new(config.authorization_engine().unwrap(), regulator);
    (clock, gatekeeper)
}

#[test]
fn wildcard_domain_requires_two_factor() {
    let gatekeeper = gatekeeper();
    let john = Subject::user("john");

    assert_eq!(
        gatekeeper.authorize(
            &AccessObject::new("mx1.mail.example.com", "/"),
            &john,
            ip("192.168.0.1"),
        ),
        Level::TwoFactor
    );
    assert_eq!(
        gatekeeper.authorize(&AccessObject::new("mail.example.com", "/"), &john, ip("192.168.0.1")),
        Level::Deny
    );
}

#[test]
fn resource_rules_apply_in_order() {
    let gatekeeper = gatekeeper();
    let john = Subject::user("john");
    let source = ip("192.168.0.1");
    let level = |path: &str| {
        gatekeeper.authorize(&AccessObject::new("home.example.com", path), &john, source)
    };

    assert_eq!(level("/my/private/resource"), Level::OneFactor);
    assert_eq!(level("/my/private/duck"), Level::Deny);
    assert_eq!(level("/my/poney"), Level::TwoFactor);
    assert_eq!(level("/elsewhere"), Level::Deny);
}

#[test]
fn network_rule_falls_through_outside_range() {
    let gatekeeper = gatekeeper();
    let object = AccessObject::new("public.example.com", "/");

    assert_eq!(gatekeeper.authorize(&object, &Subject::anonymous(), ip("10.1.3.0")), Level::Bypass);
    assert_eq!(gatekeeper.authorize(&object, &Subject::anonymous(), ip("11.1.3.0")), Level::Deny);
    assert_eq!(
        gatekeeper.authorize(&object, &Subject::anonymous(), ip("::ffff:10.1.3.0")),
        Level::Bypass
    );
}

#[test]
fn group_rule_requires_membership() {
    let gatekeeper = gatekeeper();
    let object = AccessObject::new("admin.example.com", "/");
    let admin = Subject::with_groups("harry", ["dev", "admins"]);

    assert_eq!(gatekeeper.authorize(&object, &admin, ip("192.168.0.1")), Level::TwoFactor);
    assert_eq!(
        gatekeeper.authorize(&object, &Subject::user("bob"), ip("192.168.0.1")),
        Level::Deny
    );
}

#[tokio::test]
async fn burst_of_failures_locks_out_then_clears() {
    let (clock, gatekeeper) = gatekeeper_with_clock();
    for secs in [0, 10, 15] {
        clock.set(at(secs));
        gatekeeper.mark("john", false).await.unwrap();
    }

    clock.set(at(39));
    let err = gatekeeper.regulate("john").await.unwrap_err();
    assert!(err.is_regulated());

    let http = err.into_portcullis_error(clock.now());
    assert_eq!(http.status_code().as_u16(), 429);
    assert_eq!(http.retry_after_seconds(), Some(6));

    clock.set(at(46));
    assert!(gatekeeper.regulate("john").await.is_ok());
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(secs)
}
