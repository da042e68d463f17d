//! Declarative policies: document shapes, loading, and the rule engine.

/// Single-condition matching against a recommendation.
pub mod condition;
/// Rule engine: the declarative evaluation strategy.
pub mod engine;
/// Policy directory scanning and document parsing.
pub mod loader;
/// Immutable, explicitly constructed collection of loaded policies.
pub mod set;
/// Serde shapes for policies, rules, and conditions.
pub mod types;

pub use engine::RuleEngine;
pub use loader::{load_policies, load_policy};
pub use set::PolicySet;
pub use types::{Condition, Field, Operator, Policy, Rule, RuleAction};
