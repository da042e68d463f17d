use crate::model::RecommendationKind;
use crate::policy::types::{Policy, Rule};

/// Policies in load order. Built once before evaluation, never mutated after.
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    policies: Vec<Policy>,
}

impl PolicySet {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self { policies }
    }

    /// All policies, including disabled ones.
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Enabled policies in load order.
    pub fn enabled(&self) -> impl Iterator<Item = &Policy> {
        self.policies.iter().filter(|p| p.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled_count() == 0
    }

    /// Rules of enabled policies that apply to `kind`, paired with their policy.
    pub fn rules_for<'a>(
        &'a self,
        kind: &'a RecommendationKind,
    ) -> impl Iterator<Item = (&'a Policy, &'a Rule)> + 'a {
        self.enabled().flat_map(move |policy| {
            policy
                .rules
                .iter()
                .filter(move |rule| &rule.check_type == kind)
                .map(move |rule| (policy, rule))
        })
    }

    /// Whether any enabled rule targets `kind`.
    pub fn covers(&self, kind: &RecommendationKind) -> bool {
        self.rules_for(kind).next().is_some()
    }
}
