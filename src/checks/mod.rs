//! Built-in fixed checks: hard-coded heuristics per recommendation kind.
//!
//! Each check implements `CheckSpec` and produces exactly one outcome.
//! `FixedChecks` registers them by kind and exposes them as a [`Strategy`],
//! interchangeable with the declarative rule engine.

/// Memory-reduction safety for right-sizing recommendations.
pub mod resource_limit;
/// Spot-capacity suitability based on workload name and namespace.
pub mod spot;

use std::collections::HashMap;

use crate::config::Config;
use crate::eval::{CheckResult, Strategy};
use crate::model::{Recommendation, RecommendationKind};

/// Trait for a single fixed check.
pub trait CheckSpec: Send + Sync {
    /// Judge the recommendation and return one outcome.
    fn evaluate(&self, rec: &Recommendation) -> CheckResult;
}

/// Fixed checks keyed by the recommendation kind they judge.
pub struct FixedChecks {
    specs: HashMap<RecommendationKind, Box<dyn CheckSpec>>,
}

impl FixedChecks {
    /// Build the registry from configuration.
    pub fn from_config(config: &Config) -> Self {
        use resource_limit::ResourceLimitCheck;
        use spot::SpotInstanceCheck;

        let mut specs: HashMap<RecommendationKind, Box<dyn CheckSpec>> = HashMap::new();
        specs.insert(
            RecommendationKind::SpotInstance,
            Box::new(SpotInstanceCheck::from_config(&config.spot)),
        );
        specs.insert(
            RecommendationKind::RightSize,
            Box::new(ResourceLimitCheck::from_config(&config.resource_limits)),
        );
        Self { specs }
    }

    fn get(&self, kind: &RecommendationKind) -> Option<&dyn CheckSpec> {
        self.specs.get(kind).map(|b| b.as_ref())
    }
}

impl Strategy for FixedChecks {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn covers(&self, kind: &RecommendationKind) -> bool {
        self.specs.contains_key(kind)
    }

    fn evaluate(&self, rec: &Recommendation) -> Vec<CheckResult> {
        self.get(&rec.kind)
            .map(|spec| vec![spec.evaluate(rec)])
            .unwrap_or_default()
    }
}
