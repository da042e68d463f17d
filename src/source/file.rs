use std::path::Path;

use crate::error::{Error, Result};
use crate::model::RecommendationList;
use crate::source::kubecost::SavingsResponse;

/// Read recommendations from a JSON document in either supported shape.
pub fn load_recommendations(path: &Path) -> Result<RecommendationList> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::RecommendationRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_recommendations(&content).map_err(|reason| Error::RecommendationParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parse the internal shape first; fall back to a Kubecost savings response.
///
/// The internal shape requires a `recommendations` array whose records all
/// parse. The Kubecost shape requires at least one of `recommendedRightSizing`
/// or `underutilizedNodes`. Anything else is rejected with the internal-shape
/// error, which names the offending record when there is one.
pub fn parse_recommendations(content: &str) -> std::result::Result<RecommendationList, String> {
    let internal = match serde_json::from_str::<RecommendationList>(content) {
        Ok(list) => {
            log::debug!(
                "parsed {} recommendations (internal format)",
                list.recommendations.len()
            );
            return Ok(list);
        }
        Err(e) => e,
    };

    match serde_json::from_str::<SavingsResponse>(content) {
        Ok(resp) if resp.is_present() => {
            let list = resp.into_recommendations();
            log::debug!(
                "parsed {} recommendations (kubecost format)",
                list.recommendations.len()
            );
            Ok(list)
        }
        Ok(_) => Err(format!("internal format: {internal}")),
        Err(e) => Err(format!("internal format: {internal}; kubecost format: {e}")),
    }
}
