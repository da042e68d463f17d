use serde::{Deserialize, Serialize};

use crate::eval::outcome::CheckResult;
use crate::model::{Recommendation, RecommendationKind};

/// Share of the projected spot savings that reserved capacity recovers.
const RESERVED_SAVINGS_RATIO: f64 = 0.3;

/// The approve/block verdict for one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub workload: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub savings: f64,
    pub approved: bool,
    pub checks: Vec<CheckResult>,
    /// Populated only when `approved` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
}

impl ValidationResult {
    pub fn label(&self) -> &'static str {
        if self.approved { "APPROVED" } else { "BLOCKED" }
    }

    /// Highest risk score among the outcomes, 0.0 when there are none.
    pub fn max_risk(&self) -> f64 {
        self.checks
            .iter()
            .map(|c| c.risk_score)
            .fold(0.0, f64::max)
    }

    /// First blocking outcome in evaluation order.
    pub fn first_failure(&self) -> Option<&CheckResult> {
        self.checks.iter().find(|c| !c.passed)
    }
}

/// Fold per-check outcomes into a verdict.
///
/// Approved iff every outcome passed (vacuously true for no outcomes). A single
/// failing outcome vetoes, regardless of how many others passed.
pub fn aggregate(rec: &Recommendation, outcomes: Vec<CheckResult>) -> ValidationResult {
    let approved = outcomes.iter().all(|c| c.passed);
    let alternative = (!approved).then(|| alternative_for(rec));

    ValidationResult {
        workload: rec.workload.clone(),
        kind: rec.kind.clone(),
        savings: rec.savings,
        approved,
        checks: outcomes,
        alternative,
    }
}

/// Safer action to suggest for a blocked recommendation, keyed by kind.
pub fn alternative_for(rec: &Recommendation) -> String {
    match rec.kind {
        RecommendationKind::SpotInstance => format!(
            "Use reserved capacity instead -> ~${:.0}/month savings (30% of the projected spot savings, compliant with policy)",
            rec.savings * RESERVED_SAVINGS_RATIO
        ),
        RecommendationKind::RightSize => {
            "Reduce more gradually (25% max per step) with memory monitoring between steps".into()
        }
        RecommendationKind::Other(_) => {
            "Escalate to a human reviewer for a compliant alternative".into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::outcome::RiskTier;

    fn pass() -> CheckResult {
        CheckResult::pass(RiskTier::SPOT_SUITABLE, "ok", "", "")
    }

    fn fail() -> CheckResult {
        CheckResult::fail(RiskTier::SPOT_CRITICAL_WORKLOAD, "bad", "", "")
    }

    fn spot(savings: f64) -> Recommendation {
        Recommendation::new("spot-instance", "deployment/payment-api", "production", savings)
    }

    #[test]
    fn empty_outcomes_approve() {
        let r = aggregate(&spot(100.0), vec![]);
        assert!(r.approved);
        assert_eq!(r.alternative, None);
    }

    #[test]
    fn all_pass_approves() {
        let r = aggregate(&spot(100.0), vec![pass(), pass()]);
        assert!(r.approved);
        assert_eq!(r.label(), "APPROVED");
    }

    #[test]
    fn single_failure_vetoes() {
        let r = aggregate(&spot(100.0), vec![pass(), fail(), pass()]);
        assert!(!r.approved);
        assert_eq!(r.checks.len(), 3, "all outcomes are kept");
        assert_eq!(r.first_failure().map(|c| c.check_name.as_str()), Some("bad"));
        assert_eq!(r.max_risk(), 8.5);
    }

    #[test]
    fn spot_alternative_quotes_thirty_percent() {
        let r = aggregate(&spot(1000.0), vec![fail()]);
        let alt = r.alternative.unwrap();
        assert!(alt.contains("reserved capacity"), "{alt}");
        assert!(alt.contains("$300"), "{alt}");
    }

    #[test]
    fn right_size_alternative_is_gradual() {
        let rec = Recommendation::new("right-size", "deployment/web", "default", 50.0);
        assert!(alternative_for(&rec).contains("25%"));
    }

    #[test]
    fn other_kinds_escalate() {
        let rec = Recommendation::new("storage-security", "pvc/data", "default", 50.0);
        assert!(alternative_for(&rec).contains("human reviewer"));
    }
}
