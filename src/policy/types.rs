//! Declarative policy document shapes.
//!
//! A policy file deserializes into one [`Policy`]. Example (YAML):
//!
//! ```yaml
//! name: Spot Instance Safety
//! cis_mapping: "CIS 5.7"
//! severity: HIGH
//! enabled: true
//! rules:
//!   - id: spot-001
//!     name: Block critical workloads
//!     check_type: spot-instance
//!     conditions:
//!       - field: workload
//!         operator: contains
//!         values: [payment, auth]
//!     action: block
//!     risk_score: 8.5
//!     message: Critical workload on interruptible capacity.
//!     remediation: Use reserved capacity.
//! ```

use serde::{Deserialize, Serialize};

use crate::eval::Severity;
use crate::model::RecommendationKind;

/// A named bundle of rules sharing a severity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Policy {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// External control reference (e.g. a CIS benchmark ID). Display only.
    #[serde(default)]
    pub cis_mapping: String,
    pub severity: Severity,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Only recommendations of exactly this kind are considered.
    pub check_type: RecommendationKind,
    /// All must hold. Empty matches every recommendation of `check_type`.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub action: RuleAction,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub remediation: String,
}

/// One predicate: `field` matches ANY of `values` under `operator`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Condition {
    pub field: Field,
    pub operator: Operator,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Recommendation attribute a condition inspects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    Workload,
    Namespace,
    Type,
    NodePool,
    StorageClass,
    AccessMode,
    /// Never matches.
    Unknown(String),
}

impl Field {
    pub fn as_str(&self) -> &str {
        match self {
            Field::Workload => "workload",
            Field::Namespace => "namespace",
            Field::Type => "type",
            Field::NodePool => "node_pool",
            Field::StorageClass => "storage_class",
            Field::AccessMode => "access_mode",
            Field::Unknown(name) => name,
        }
    }

    /// Whether values of this field are user text compared without case.
    /// `type` is an internal taxonomy value and compared exactly.
    pub fn case_insensitive(&self) -> bool {
        !matches!(self, Field::Type | Field::Unknown(_))
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        match name.as_str() {
            "workload" => Field::Workload,
            "namespace" => Field::Namespace,
            "type" => Field::Type,
            "node_pool" => Field::NodePool,
            "storage_class" => Field::StorageClass,
            "access_mode" => Field::AccessMode,
            _ => Field::Unknown(name),
        }
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Contains,
    Equals,
    StartsWith,
    Regex,
    /// Never matches.
    Unknown(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Contains => "contains",
            Operator::Equals => "equals",
            Operator::StartsWith => "starts_with",
            Operator::Regex => "regex",
            Operator::Unknown(name) => name,
        }
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        match name.as_str() {
            "contains" => Operator::Contains,
            "equals" => Operator::Equals,
            "starts_with" => Operator::StartsWith,
            "regex" => Operator::Regex,
            _ => Operator::Unknown(name),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

/// What a firing rule does. Only `block` vetoes approval.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RuleAction {
    Block,
    Allow,
    Warn,
    Other(String),
}

impl RuleAction {
    pub fn as_str(&self) -> &str {
        match self {
            RuleAction::Block => "block",
            RuleAction::Allow => "allow",
            RuleAction::Warn => "warn",
            RuleAction::Other(name) => name,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, RuleAction::Block)
    }
}

impl From<String> for RuleAction {
    fn from(name: String) -> Self {
        match name.as_str() {
            "block" => RuleAction::Block,
            "allow" => RuleAction::Allow,
            "warn" => RuleAction::Warn,
            _ => RuleAction::Other(name),
        }
    }
}

impl From<RuleAction> for String {
    fn from(action: RuleAction) -> Self {
        action.as_str().to_string()
    }
}
