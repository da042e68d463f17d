use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[serde(alias = "info", alias = "Info")]
    Info,
    #[serde(alias = "low", alias = "Low")]
    Low,
    #[serde(alias = "medium", alias = "Medium")]
    Medium,
    #[serde(alias = "high", alias = "High")]
    High,
    #[serde(alias = "critical", alias = "Critical")]
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A severity paired with its numeric risk score (0.0 to 10.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskTier {
    pub severity: Severity,
    pub risk_score: f64,
}

impl RiskTier {
    pub const NONE: RiskTier = RiskTier::new(Severity::Info, 0.0);
    pub const SPOT_CRITICAL_WORKLOAD: RiskTier = RiskTier::new(Severity::High, 8.5);
    pub const SPOT_PRODUCTION_NAMESPACE: RiskTier = RiskTier::new(Severity::Medium, 6.5);
    pub const SPOT_SUITABLE: RiskTier = RiskTier::new(Severity::Low, 2.0);
    pub const REDUCTION_SEVERE: RiskTier = RiskTier::new(Severity::High, 7.5);
    pub const REDUCTION_MODERATE: RiskTier = RiskTier::new(Severity::Medium, 5.0);
    pub const REDUCTION_SAFE: RiskTier = RiskTier::new(Severity::Low, 1.5);

    pub const fn new(severity: Severity, risk_score: f64) -> Self {
        Self {
            severity,
            risk_score,
        }
    }
}

/// The outcome of one rule or fixed check against one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub passed: bool,
    pub severity: Severity,
    pub risk_score: f64,
    pub check_name: String,
    pub message: String,
    pub remediation: String,
}

impl CheckResult {
    /// A passing outcome at the given tier.
    pub fn pass(
        tier: RiskTier,
        check_name: impl Into<String>,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self::new(true, tier, check_name, message, remediation)
    }

    /// A failing (blocking) outcome at the given tier.
    pub fn fail(
        tier: RiskTier,
        check_name: impl Into<String>,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self::new(false, tier, check_name, message, remediation)
    }

    fn new(
        passed: bool,
        tier: RiskTier,
        check_name: impl Into<String>,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            passed,
            severity: tier.severity,
            risk_score: tier.risk_score,
            check_name: check_name.into(),
            message: message.into(),
            remediation: remediation.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.passed { "PASS" } else { "FAIL" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_any_case() {
        for raw in ["\"HIGH\"", "\"high\"", "\"High\""] {
            let s: Severity = serde_json::from_str(raw).unwrap();
            assert_eq!(s, Severity::High);
        }
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Low > Severity::Info);
    }

    #[test]
    fn tier_carries_into_result() {
        let r = CheckResult::fail(RiskTier::REDUCTION_SEVERE, "c", "m", "r");
        assert!(!r.passed);
        assert_eq!(r.severity, Severity::High);
        assert_eq!(r.risk_score, 7.5);
        assert_eq!(r.label(), "FAIL");
    }
}
