//! Types describing a single proposed cost optimization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of optimization a recommendation proposes.
///
/// Ingested from an open string tag. Known kinds get their own variant so the
/// evaluator can match on them; anything else is carried verbatim in
/// [`RecommendationKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecommendationKind {
    /// `spot-instance`: move a workload or node to interruptible capacity.
    SpotInstance,
    /// `right-size`: shrink a workload's resource requests/limits.
    RightSize,
    /// Any other tag, compared by exact string equality.
    Other(String),
}

impl RecommendationKind {
    /// The wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            RecommendationKind::SpotInstance => "spot-instance",
            RecommendationKind::RightSize => "right-size",
            RecommendationKind::Other(tag) => tag,
        }
    }
}

impl From<String> for RecommendationKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "spot-instance" => RecommendationKind::SpotInstance,
            "right-size" => RecommendationKind::RightSize,
            _ => RecommendationKind::Other(tag),
        }
    }
}

impl From<&str> for RecommendationKind {
    fn from(tag: &str) -> Self {
        RecommendationKind::from(tag.to_string())
    }
}

impl From<RecommendationKind> for String {
    fn from(kind: RecommendationKind) -> Self {
        match kind {
            RecommendationKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CPU/memory snapshot in Kubernetes quantity notation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub memory: String,
}

impl Resources {
    pub fn new(cpu: impl Into<String>, memory: impl Into<String>) -> Self {
        Self {
            cpu: cpu.into(),
            memory: memory.into(),
        }
    }

    /// Placeholder used when the source cannot attribute concrete values.
    pub fn varies() -> Self {
        Self::new("varies", "varies")
    }
}

/// One proposed optimization, as produced by the cost-analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Usually `<kind>/<name>`, e.g. `deployment/payment-api`.
    pub workload: String,
    #[serde(default)]
    pub namespace: String,
    /// Projected savings in dollars per month.
    #[serde(default)]
    pub savings: f64,
    #[serde(default)]
    pub current: Resources,
    #[serde(default)]
    pub recommended: Resources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_pool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_mode: Option<String>,
}

impl Recommendation {
    /// Build a recommendation with empty resource snapshots.
    pub fn new(
        kind: impl Into<RecommendationKind>,
        workload: impl Into<String>,
        namespace: impl Into<String>,
        savings: f64,
    ) -> Self {
        Self {
            kind: kind.into(),
            workload: workload.into(),
            namespace: namespace.into(),
            savings,
            current: Resources::default(),
            recommended: Resources::default(),
            node_pool: None,
            storage_class: None,
            access_mode: None,
        }
    }

    /// Set the current and recommended memory quantities.
    pub fn with_memory(
        mut self,
        current: impl Into<String>,
        recommended: impl Into<String>,
    ) -> Self {
        self.current.memory = current.into();
        self.recommended.memory = recommended.into();
        self
    }
}

/// Top-level document in the internal recommendation format.
///
/// `recommendations` is required, so a document of another shape does not
/// parse as an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_map_to_variants() {
        assert_eq!(
            RecommendationKind::from("spot-instance"),
            RecommendationKind::SpotInstance
        );
        assert_eq!(
            RecommendationKind::from("right-size"),
            RecommendationKind::RightSize
        );
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let kind = RecommendationKind::from("storage-security");
        assert_eq!(kind, RecommendationKind::Other("storage-security".into()));
        assert_eq!(kind.as_str(), "storage-security");
    }

    #[test]
    fn kind_comparison_is_case_sensitive() {
        assert_ne!(
            RecommendationKind::from("Spot-Instance"),
            RecommendationKind::SpotInstance
        );
    }

    #[test]
    fn deserializes_internal_shape() {
        let json = r#"{
            "type": "right-size",
            "workload": "deployment/web",
            "namespace": "default",
            "savings": 120.5,
            "current": {"cpu": "500m", "memory": "2Gi"},
            "recommended": {"cpu": "250m", "memory": "1Gi"}
        }"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.kind, RecommendationKind::RightSize);
        assert_eq!(rec.current.memory, "2Gi");
        assert_eq!(rec.node_pool, None);
    }

    #[test]
    fn serializes_kind_as_tag() {
        let rec = Recommendation::new("spot-instance", "node/a", "kube-system", 10.0);
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["type"], "spot-instance");
        assert!(value.get("node_pool").is_none());
    }
}
