use crate::checks::CheckSpec;
use crate::config::SpotConfig;
use crate::eval::{CheckResult, RiskTier};
use crate::model::Recommendation;

pub const CHECK_NAME: &str = "CIS 5.7 - Spot Instance Suitability";

/// Spot-capacity suitability.
///
/// Evaluation order:
/// 1. Workload name contains a critical keyword → FAIL (HIGH)
/// 2. Namespace contains the production marker → FAIL (MEDIUM)
/// 3. Otherwise → PASS (LOW)
pub struct SpotInstanceCheck {
    /// Lower-cased substrings marking a workload as business-critical.
    critical_keywords: Vec<String>,
    /// Lower-cased namespace substring marking production.
    production_marker: String,
}

impl SpotInstanceCheck {
    pub fn from_config(config: &SpotConfig) -> Self {
        Self {
            critical_keywords: config
                .critical_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            production_marker: config.production_marker.to_lowercase(),
        }
    }
}

impl CheckSpec for SpotInstanceCheck {
    fn evaluate(&self, rec: &Recommendation) -> CheckResult {
        let workload = rec.workload.to_lowercase();

        if let Some(keyword) = self
            .critical_keywords
            .iter()
            .find(|k| workload.contains(k.as_str()))
        {
            return CheckResult::fail(
                RiskTier::SPOT_CRITICAL_WORKLOAD,
                CHECK_NAME,
                format!(
                    "Workload appears critical (matches `{keyword}`). Spot capacity can be reclaimed with 2 minutes notice."
                ),
                "Use reserved capacity for ~30% savings with guaranteed availability, or reserve spot for stateless, fault-tolerant workloads.",
            );
        }

        if !self.production_marker.is_empty()
            && rec.namespace.to_lowercase().contains(&self.production_marker)
        {
            return CheckResult::fail(
                RiskTier::SPOT_PRODUCTION_NAMESPACE,
                CHECK_NAME,
                "Production namespace detected. Spot interruptions may breach SLA commitments.",
                "Limit spot capacity to dev/staging, or add interruption handling before moving production workloads.",
            );
        }

        CheckResult::pass(
            RiskTier::SPOT_SUITABLE,
            CHECK_NAME,
            "Workload appears suitable for spot capacity (non-critical, non-production).",
            "Handle interruption notices and test failover before rollout.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::eval::Severity;

    fn eval(workload: &str, namespace: &str) -> CheckResult {
        let spec = SpotInstanceCheck::from_config(&Config::default_config().spot);
        spec.evaluate(&Recommendation::new("spot-instance", workload, namespace, 100.0))
    }

    #[test]
    fn critical_workload_fails_high() {
        let r = eval("deployment/payment-api", "production");
        assert!(!r.passed);
        assert_eq!(r.severity, Severity::High);
        assert_eq!(r.risk_score, 8.5);
        assert!(r.message.contains("payment"));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let r = eval("Deployment/Checkout-Web", "dev");
        assert_eq!(r.risk_score, 8.5);
    }

    #[test]
    fn first_keyword_hit_wins() {
        // "order" precedes "production" in the keyword list.
        let r = eval("deployment/production-order-sync", "dev");
        assert!(r.message.contains("`order`"), "{}", r.message);
    }

    #[test]
    fn production_namespace_fails_medium() {
        let r = eval("deployment/report-renderer", "my-PROD-ns");
        assert!(!r.passed);
        assert_eq!(r.severity, Severity::Medium);
        assert_eq!(r.risk_score, 6.5);
    }

    #[test]
    fn non_critical_passes_low() {
        let r = eval("deployment/batch-worker", "staging");
        assert!(r.passed);
        assert_eq!(r.severity, Severity::Low);
        assert_eq!(r.risk_score, 2.0);
        assert_eq!(r.check_name, CHECK_NAME);
    }
}
