//! Errors that abort a run before evaluation starts.
//!
//! Problems local to one rule or check (a bad regex, an unparseable memory
//! quantity) are not errors: they are logged and treated as a non-match or a
//! zero value.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An explicitly named config overlay could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly named config overlay is not valid TOML for kosva.
    #[error("failed to parse config {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// The merged configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A policy document could not be read.
    #[error("failed to read policy {}: {source}", .path.display())]
    PolicyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A policy document is not a valid policy.
    #[error("failed to parse policy {}: {reason}", .path.display())]
    PolicyParse { path: PathBuf, reason: String },

    /// The policy directory could not be traversed.
    #[error("failed to scan policy directory {}: {reason}", .path.display())]
    PolicyWalk { path: PathBuf, reason: String },

    /// The policy directory holds no enabled policies.
    #[error("no enabled policies found in {}", .dir.display())]
    NoPolicies { dir: PathBuf },

    /// A recommendation document could not be read.
    #[error("failed to read recommendations {}: {source}", .path.display())]
    RecommendationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recommendation document matches neither supported shape.
    #[error(
        "failed to parse recommendations {} as either the internal or the Kubecost format: {reason}",
        .path.display()
    )]
    RecommendationParse { path: PathBuf, reason: String },

    /// The cost-analysis service could not be reached or returned garbage.
    #[error("kubecost request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The cost-analysis service answered with a body of neither known shape.
    #[error("kubecost API returned an unrecognized body: {reason}")]
    FetchBody { reason: String },

    /// The cost-analysis service answered with a non-success status.
    #[error("kubecost API returned {status}: {body}")]
    FetchStatus { status: u16, body: String },

    /// The requested strategy cannot be built from the given inputs.
    #[error("strategy unavailable: {0}")]
    StrategyUnavailable(&'static str),
}
