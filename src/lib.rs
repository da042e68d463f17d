//! kosva: validates cost-optimization recommendations against safety policies.
//!
//! Each recommendation (e.g. "move this node to spot capacity", "shrink this
//! workload's memory by 50%") is judged before anyone acts on it. The result
//! is an approve/block verdict with per-check severity, risk score,
//! remediation text, and a safer alternative when blocked.
//!
//! # Architecture
//!
//! - **[`model`]** — Recommendation data and Kubernetes memory quantity parsing.
//! - **[`policy`]** — Declarative policies: document shapes, loader, condition matching, rule engine.
//! - **[`checks`]** — Built-in fixed checks (spot suitability, memory-reduction safety).
//! - **[`eval`]** — `Strategy` trait, `Validator` (strategy selection), outcomes, verdict aggregation.
//! - **[`source`]** — Recommendation input: JSON files (internal or Kubecost shape) and the Kubecost API.
//! - **[`report`]** — Savings summary and text/JSON rendering.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Diagnostics logger and the append-only verdict log.

/// Built-in fixed checks and the fixed-check strategy.
pub mod checks;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Crate error type.
pub mod error;
/// Strategy selection, outcomes, and verdict aggregation.
pub mod eval;
/// Diagnostics logging and the verdict log.
pub mod logging;
/// Recommendation data model.
pub mod model;
/// Declarative policy engine.
pub mod policy;
/// Report rendering.
pub mod report;
/// Recommendation sources.
pub mod source;

pub use error::{Error, Result};

use eval::ValidationResult;
use model::Recommendation;

/// Validate a recommendation with the built-in fixed checks and default config.
///
/// This is the main entry point for tests and simple usage.
/// To use declarative policies, build an [`eval::Validator`] directly.
pub fn validate(rec: &Recommendation) -> ValidationResult {
    eval::Validator::fixed_only().validate(rec)
}
