//! Kubecost savings API: response shape, translation, and HTTP client.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Recommendation, RecommendationKind, RecommendationList, Resources};

/// Namespace assigned to node-level recommendations.
pub const NODE_NAMESPACE: &str = "kube-system";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of `GET /model/savings`.
///
/// Both lists are optional on the wire; a body carrying neither is not a
/// savings response (see [`SavingsResponse::is_present`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResponse {
    #[serde(default)]
    pub recommended_right_sizing: Option<Vec<RightSizing>>,
    #[serde(default)]
    pub underutilized_nodes: Option<Vec<UnderutilizedNode>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RightSizing {
    pub cluster_id: String,
    pub namespace: String,
    pub controller_kind: String,
    pub controller_name: String,
    pub container: String,
    pub recommendations: ResourceRecommendations,
    pub total_monthly_savings: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceRecommendations {
    pub cpu: ResourceDetail,
    pub memory: ResourceDetail,
}

/// CPU in millicores, memory in MB.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceDetail {
    pub current: f64,
    pub recommended: f64,
    pub monthly_savings: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnderutilizedNode {
    #[serde(rename = "node")]
    pub node_name: String,
    #[serde(rename = "monthlySavings")]
    pub monthly_savings: f64,
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "recommendedInstanceType")]
    pub replacement_type: String,
}

impl SavingsResponse {
    /// Whether at least one of the two recommendation lists was sent.
    pub fn is_present(&self) -> bool {
        self.recommended_right_sizing.is_some() || self.underutilized_nodes.is_some()
    }

    /// Translate into the internal recommendation list.
    ///
    /// Right-sizing entries become `right-size`; underutilized nodes become
    /// `spot-instance` on `node/<name>` with placeholder resources.
    pub fn into_recommendations(self) -> RecommendationList {
        let right_sizing = self.recommended_right_sizing.unwrap_or_default();
        let right_size = right_sizing.into_iter().map(|rs| {
            let mut rec = Recommendation::new(
                RecommendationKind::RightSize,
                format!("{}/{}", rs.controller_kind, rs.controller_name),
                rs.namespace,
                rs.total_monthly_savings,
            );
            let (cpu, memory) = (&rs.recommendations.cpu, &rs.recommendations.memory);
            rec.current = Resources::new(format_cpu(cpu.current), format_memory(memory.current));
            rec.recommended =
                Resources::new(format_cpu(cpu.recommended), format_memory(memory.recommended));
            rec
        });

        let nodes = self.underutilized_nodes.unwrap_or_default();
        let nodes = nodes.into_iter().map(|node| {
            let mut rec = Recommendation::new(
                RecommendationKind::SpotInstance,
                format!("node/{}", node.node_name),
                NODE_NAMESPACE,
                node.monthly_savings,
            );
            rec.current = Resources::varies();
            rec.recommended = Resources::varies();
            rec
        });

        RecommendationList {
            recommendations: right_size.chain(nodes).collect(),
            cluster: "from-kubecost-api".into(),
            timestamp: String::new(),
        }
    }
}

/// Millicores as a Kubernetes CPU quantity.
pub fn format_cpu(millicores: f64) -> String {
    format!("{millicores:.0}m")
}

/// MB as `Mi`, or `Gi` with one decimal from 1024 MB up.
pub fn format_memory(megabytes: f64) -> String {
    if megabytes >= 1024.0 {
        format!("{:.1}Gi", megabytes / 1024.0)
    } else {
        format!("{megabytes:.0}Mi")
    }
}

/// Blocking client for the Kubecost savings endpoint.
pub struct Client {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_builder(base_url, reqwest::blocking::Client::builder())
    }

    fn with_builder(
        base_url: impl Into<String>,
        builder: reqwest::blocking::ClientBuilder,
    ) -> Result<Self> {
        let http = builder.timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Fetch and translate current savings recommendations.
    pub fn recommendations(&self) -> Result<RecommendationList> {
        let url = format!("{}/model/savings", self.base_url.trim_end_matches('/'));
        log::info!("fetching recommendations from {url}");

        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::FetchStatus {
                status: status.as_u16(),
                body,
            });
        }
        let savings: SavingsResponse = response.json()?;
        if !savings.is_present() {
            return Err(Error::FetchBody {
                reason: "neither recommendedRightSizing nor underutilizedNodes present".into(),
            });
        }
        Ok(savings.into_recommendations())
    }
}
