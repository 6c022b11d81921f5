//! The decision service handed to the gateway's request handlers.

use std::net::IpAddr;
use std::sync::Arc;

use portcullis_authz::{AuthorizationEngine, Decision};
use portcullis_config::{ConfigError, PortcullisConfig};
use portcullis_core::{AccessObject, Level, Subject};
use portcullis_regulation::{RegulationResult, Regulator, StoreResult, TraceStore};
use portcullis_telemetry::{
    record_authentication_attempt, record_authorization_decision, record_regulation_check,
    RegulationOutcome,
};
use tracing::info;

/// Owns the authorization engine and the regulator and counts every decision
/// they make.
///
/// Cloning is cheap; clones share both engines.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    authorizer: Arc<AuthorizationEngine>,
    regulator: Arc<Regulator>,
}

impl Gatekeeper {
    /// Wraps already-built engines.
    pub fn new(authorizer: AuthorizationEngine, regulator: Regulator) -> Self {
        Self {
            authorizer: Arc::new(authorizer),
            regulator: Arc::new(regulator),
        }
    }

    /// Validates `config` and builds both engines from it.
    ///
    /// Traces are kept in `store`; the regulator reads the system clock.
    pub fn from_config(
        config: &PortcullisConfig,
        store: Arc<dyn TraceStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let authorizer = config.authorization_engine()?;
        let regulator = Regulator::new(config.regulation, store);
        info!(
            rules = authorizer.rule_count(),
            regulation = config.regulation.is_enabled(),
            "gatekeeper ready"
        );
        Ok(Self::new(authorizer, regulator))
    }

    /// The authentication level `subject` needs to reach `object` from `source`.
    pub fn authorize(&self, object: &AccessObject, subject: &Subject, source: IpAddr) -> Level {
        self.decide(object, subject, source).level
    }

    /// Like [`authorize`](Self::authorize), also reporting which rule decided.
    pub fn decide(&self, object: &AccessObject, subject: &Subject, source: IpAddr) -> Decision {
        let decision = self.authorizer.decide(object, subject, source);
        record_authorization_decision(decision.level);
        decision
    }

    /// Records a completed first-factor attempt.
    pub async fn mark(&self, user_id: &str, succeeded: bool) -> StoreResult<()> {
        self.regulator.mark(user_id, succeeded).await?;
        record_authentication_attempt(succeeded);
        Ok(())
    }

    /// Checks whether `user_id` may attempt another first-factor login.
    pub async fn regulate(&self, user_id: &str) -> RegulationResult<()> {
        let result = self.regulator.regulate(user_id).await;
        let outcome = match &result {
            Ok(()) => RegulationOutcome::Allowed,
            Err(err) if err.is_regulated() => RegulationOutcome::Regulated,
            Err(_) => RegulationOutcome::Error,
        };
        record_regulation_check(outcome);
        result
    }

    /// The authorization engine.
    pub fn authorizer(&self) -> &AuthorizationEngine {
        &self.authorizer
    }

    /// The regulator.
    pub fn regulator(&self) -> &Regulator {
        &self.regulator
    }
}
