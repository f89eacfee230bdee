//! Block/allow policy gate.
//!
//! The gate is the single place where a scan result turns into a decision.
//! Richer policies (per-scanner thresholds, allow/deny lists, escalation to
//! a human) implement [`ScanPolicy`] and replace [`ValidityPolicy`] without
//! touching the client.

use serde::Serialize;

use crate::result::ScanResult;

/// Outcome of running a scan result through a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub blocked: bool,
    pub reason: String,
}

impl GateDecision {
    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            blocked: true,
            reason: reason.into(),
        }
    }

    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            blocked: false,
            reason: reason.into(),
        }
    }

    pub fn into_parts(self) -> (bool, String) {
        (self.blocked, self.reason)
    }
}

/// A pure decision over a scan result.
pub trait ScanPolicy {
    fn evaluate(&self, result: &ScanResult) -> GateDecision;
}

/// Blocks exactly when the service reported the text as invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityPolicy;

impl ScanPolicy for ValidityPolicy {
    fn evaluate(&self, result: &ScanResult) -> GateDecision {
        let label = result.kind().label();
        if result.is_valid() {
            GateDecision::allow(format!("{label} accepted"))
        } else {
            GateDecision::block(format!("{label} failed security validation"))
        }
    }
}

/// Evaluate a result with the default [`ValidityPolicy`].
pub fn should_block(result: &ScanResult) -> GateDecision {
    ValidityPolicy.evaluate(result)
}

pub fn should_block_prompt(result: &ScanResult) -> GateDecision {
    should_block(result)
}

pub fn should_block_output(result: &ScanResult) -> GateDecision {
    should_block(result)
}
