//! Where recommendations come from: JSON documents on disk or the Kubecost API.

/// JSON recommendation documents on disk.
pub mod file;
/// Kubecost savings API shapes, translation, and HTTP client.
pub mod kubecost;

pub use file::{load_recommendations, parse_recommendations};
pub use kubecost::Client;
