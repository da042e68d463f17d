use std::sync::Arc;

use crate::eval::{CheckResult, RiskTier, Strategy};
use crate::model::{Recommendation, RecommendationKind};
use crate::policy::condition;
use crate::policy::set::PolicySet;

/// Declarative strategy: evaluates every applicable rule of a [`PolicySet`].
///
/// Evaluation order:
/// 1. Enabled policies in load order
/// 2. Rules whose `check_type` equals the recommendation kind, in declaration order
/// 3. A rule fires when all of its conditions hold; each firing rule yields one outcome
///
/// There is no short-circuit across rules: a blocking rule does not stop
/// later rules from being evaluated and reported.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    policies: Arc<PolicySet>,
}

impl RuleEngine {
    pub fn new(policies: Arc<PolicySet>) -> Self {
        Self { policies }
    }
}

impl Strategy for RuleEngine {
    fn name(&self) -> &'static str {
        "declarative"
    }

    fn covers(&self, kind: &RecommendationKind) -> bool {
        self.policies.covers(kind)
    }

    fn evaluate(&self, rec: &Recommendation) -> Vec<CheckResult> {
        self.policies
            .rules_for(&rec.kind)
            .filter(|(_, rule)| rule.conditions.iter().all(|c| condition::evaluate(c, rec)))
            .map(|(policy, rule)| {
                log::debug!(
                    "rule fired: {} / {} ({}) on {}",
                    policy.name,
                    rule.name,
                    rule.action.as_str(),
                    rec.workload
                );
                let tier = RiskTier::new(policy.severity, rule.risk_score);
                let name = format!("{} - {}", policy.name, rule.name);
                if rule.action.is_block() {
                    CheckResult::fail(tier, name, &rule.message, &rule.remediation)
                } else {
                    CheckResult::pass(tier, name, &rule.message, &rule.remediation)
                }
            })
            .collect()
    }
}
