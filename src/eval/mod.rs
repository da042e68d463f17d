pub mod outcome;
pub mod verdict;

pub use outcome::{CheckResult, RiskTier, Severity};
pub use verdict::{ValidationResult, aggregate, alternative_for};

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::checks::FixedChecks;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Recommendation, RecommendationKind};
use crate::policy::{PolicySet, RuleEngine};

/// A way of judging recommendations.
///
/// Implemented by the declarative rule engine and by the fixed heuristic
/// checks, so either can stand in for the other.
pub trait Strategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this strategy has anything to say about the given kind.
    fn covers(&self, kind: &RecommendationKind) -> bool;

    /// All outcomes for the recommendation, in a stable order.
    fn evaluate(&self, rec: &Recommendation) -> Vec<CheckResult>;
}

/// Which strategies the validator consults.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StrategyMode {
    /// Declarative rules where they cover the kind, fixed checks otherwise.
    #[default]
    Auto,
    /// Declarative rules only.
    Declarative,
    /// Fixed checks only.
    Fixed,
}

/// Selects a strategy per recommendation and aggregates its outcomes.
///
/// Holds only read-only state, so one instance can be shared across threads.
pub struct Validator {
    /// In priority order; the first that covers a kind wins.
    strategies: Vec<Box<dyn Strategy>>,
}

impl Validator {
    /// Build a validator from configuration and an optional policy set.
    ///
    /// Without a policy set, `auto` degrades to the fixed checks alone.
    pub fn from_config(config: &Config, policies: Option<Arc<PolicySet>>) -> Result<Self> {
        Self::with_mode(config.settings.strategy, policies, FixedChecks::from_config(config))
    }

    pub fn with_mode(
        mode: StrategyMode,
        policies: Option<Arc<PolicySet>>,
        fixed: FixedChecks,
    ) -> Result<Self> {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();
        match (mode, policies) {
            (StrategyMode::Auto, Some(set)) => {
                strategies.push(Box::new(RuleEngine::new(set)));
                strategies.push(Box::new(fixed));
            }
            (StrategyMode::Auto | StrategyMode::Fixed, None) | (StrategyMode::Fixed, Some(_)) => {
                strategies.push(Box::new(fixed));
            }
            (StrategyMode::Declarative, Some(set)) => {
                strategies.push(Box::new(RuleEngine::new(set)));
            }
            (StrategyMode::Declarative, None) => {
                return Err(Error::StrategyUnavailable(
                    "declarative mode requires a policy directory",
                ));
            }
        }
        Ok(Self { strategies })
    }

    /// Validator using only the built-in fixed checks from the default config.
    pub fn fixed_only() -> Self {
        Self {
            strategies: vec![Box::new(FixedChecks::from_config(&Config::default_config()))],
        }
    }

    fn select(&self, kind: &RecommendationKind) -> Option<&dyn Strategy> {
        self.strategies
            .iter()
            .find(|s| s.covers(kind))
            .map(|s| s.as_ref())
    }

    /// Produce the verdict for a single recommendation.
    pub fn validate(&self, rec: &Recommendation) -> ValidationResult {
        let outcomes = match self.select(&rec.kind) {
            Some(strategy) => {
                log::debug!(
                    "{} ({}) -> {} strategy",
                    rec.workload,
                    rec.kind,
                    strategy.name()
                );
                strategy.evaluate(rec)
            }
            None => {
                log::debug!("{} ({}) -> no applicable checks", rec.workload, rec.kind);
                vec![CheckResult::pass(
                    RiskTier::NONE,
                    "No applicable checks",
                    format!("No policy rule or built-in check covers type `{}`.", rec.kind),
                    "Review manually if this recommendation type carries operational risk.",
                )]
            }
        };
        aggregate(rec, outcomes)
    }

    /// Validate every recommendation in parallel, preserving input order.
    pub fn validate_all(&self, recs: &[Recommendation]) -> Vec<ValidationResult> {
        recs.par_iter().map(|rec| self.validate(rec)).collect()
    }
}
