use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::policy::set::PolicySet;
use crate::policy::types::Policy;

/// Policy document formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(Format::Yaml),
            Some("toml") => Some(Format::Toml),
            _ => None,
        }
    }
}

/// Parse a single policy document from disk.
pub fn load_policy(path: &Path) -> Result<Policy> {
    let format = Format::from_path(path).unwrap_or(Format::Yaml);
    let content = std::fs::read_to_string(path).map_err(|source| Error::PolicyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = match format {
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| Error::PolicyParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Scan `dir` recursively and load every enabled policy document.
///
/// Files are visited in lexical path order so that rule evaluation order
/// is reproducible across runs and platforms. Files with other extensions
/// are skipped. Any unreadable or malformed document aborts the load, and a
/// directory yielding no enabled policies is an error.
pub fn load_policies(dir: &Path) -> Result<PolicySet> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::PolicyWalk {
            path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
            reason: e.to_string(),
        })?;
        if entry.file_type().is_file() && Format::from_path(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }

    let mut policies = Vec::new();
    for path in &files {
        let policy = load_policy(path)?;
        if policy.enabled {
            log::debug!("loaded policy `{}` from {}", policy.name, path.display());
            policies.push(policy);
        } else {
            log::debug!("skipping disabled policy `{}` ({})", policy.name, path.display());
        }
    }

    let set = PolicySet::new(policies);
    if set.is_empty() {
        return Err(Error::NoPolicies {
            dir: dir.to_path_buf(),
        });
    }
    log::info!("loaded {} policies from {}", set.enabled_count(), dir.display());
    Ok(set)
}
