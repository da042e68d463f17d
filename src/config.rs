use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::eval::StrategyMode;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub spot: SpotConfig,
    #[serde(default)]
    pub resource_limits: ResourceLimitConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub strategy: StrategyMode,
    /// Policy directory used when none is given on the command line.
    /// Empty means no declarative policies.
    #[serde(default)]
    pub policy_dir: String,
    /// Verdict log path. Empty disables the log.
    #[serde(default)]
    pub verdict_log: String,
}

impl Settings {
    /// `policy_dir` with `~` and env vars expanded, if set.
    pub fn policy_dir(&self) -> Option<PathBuf> {
        expand_path(&self.policy_dir)
    }

    /// `verdict_log` with `~` and env vars expanded, if set.
    pub fn verdict_log(&self) -> Option<PathBuf> {
        expand_path(&self.verdict_log)
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SpotConfig {
    #[serde(default)]
    pub critical_keywords: Vec<String>,
    #[serde(default)]
    pub production_marker: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResourceLimitConfig {
    #[serde(default = "default_high_reduction_pct")]
    pub high_reduction_pct: f64,
    #[serde(default = "default_medium_reduction_pct")]
    pub medium_reduction_pct: f64,
}

impl Default for ResourceLimitConfig {
    fn default() -> Self {
        Self {
            high_reduction_pct: default_high_reduction_pct(),
            medium_reduction_pct: default_medium_reduction_pct(),
        }
    }
}

fn default_high_reduction_pct() -> f64 {
    50.0
}

fn default_medium_reduction_pct() -> f64 {
    30.0
}

/// Expand `~` and `$VARS` in a configured path. Empty or unexpandable → None.
pub fn expand_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match shellexpand::full(raw) {
        Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
        Err(e) => {
            log::warn!("cannot expand path `{raw}`: {e}");
            None
        }
    }
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    spot: SpotOverlay,
    #[serde(default)]
    resource_limits: ResourceLimitOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    strategy: Option<StrategyMode>,
    policy_dir: Option<String>,
    verdict_log: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct SpotOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    critical_keywords: Vec<String>,
    #[serde(default)]
    remove_critical_keywords: Vec<String>,
    production_marker: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ResourceLimitOverlay {
    high_reduction_pct: Option<f64>,
    medium_reduction_pct: Option<f64>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the overlay at `path`, or ~/.config/kosva/config.toml when `path` is None
    /// 3. Validate the merged fixed-check thresholds
    ///
    /// An explicit `path` must exist and parse. The default overlay may be
    /// absent; a malformed one is logged and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default_config();
        let overlay = match path {
            Some(p) => Some(Self::read_overlay(p)?),
            None => Self::default_overlay_path().and_then(|p| Self::load_default_overlay(&p)),
        };
        if let Some(overlay) = overlay {
            config.apply_overlay(overlay);
        }
        config.validate()?;
        Ok(config)
    }

    fn default_overlay_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(Path::new(&home).join(".config/kosva/config.toml"))
    }

    fn read_overlay(path: &Path) -> Result<ConfigOverlay> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let overlay = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("applied config overlay {}", path.display());
        Ok(overlay)
    }

    fn load_default_overlay(path: &Path) -> Option<ConfigOverlay> {
        if !path.exists() {
            return None;
        }
        match Self::read_overlay(path) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::warn!("{e}; using defaults");
                None
            }
        }
    }

    /// Reject threshold pairs the resource-limit check cannot honour.
    pub fn validate(&self) -> Result<()> {
        let rl = &self.resource_limits;
        let in_range = |pct: f64| (0.0..=100.0).contains(&pct);
        if !in_range(rl.high_reduction_pct) || !in_range(rl.medium_reduction_pct) {
            return Err(Error::InvalidConfig(format!(
                "resource_limits percentages must lie in 0..=100 (high {}, medium {})",
                rl.high_reduction_pct, rl.medium_reduction_pct
            )));
        }
        if rl.medium_reduction_pct > rl.high_reduction_pct {
            return Err(Error::InvalidConfig(format!(
                "resource_limits.medium_reduction_pct ({}) exceeds high_reduction_pct ({})",
                rl.medium_reduction_pct, rl.high_reduction_pct
            )));
        }
        Ok(())
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        let s = overlay.settings;
        if let Some(v) = s.strategy {
            self.settings.strategy = v;
        }
        if let Some(v) = s.policy_dir {
            self.settings.policy_dir = v;
        }
        if let Some(v) = s.verdict_log {
            self.settings.verdict_log = v;
        }

        // Spot
        let sp = overlay.spot;
        let keywords_before = self.spot.critical_keywords.clone();
        merge_list(
            &mut self.spot.critical_keywords,
            sp.critical_keywords,
            &sp.remove_critical_keywords,
            sp.replace,
        );
        if self.spot.critical_keywords != keywords_before {
            log::info!(
                "spot check critical keywords overridden: {:?}",
                self.spot.critical_keywords
            );
        }
        if let Some(v) = sp.production_marker
            && v != self.spot.production_marker
        {
            log::info!("spot check production marker overridden: `{v}`");
            self.spot.production_marker = v;
        }

        // Resource limits
        let rl = overlay.resource_limits;
        if let Some(v) = rl.high_reduction_pct {
            log::info!("resource limit high_reduction_pct overridden: {v}");
            self.resource_limits.high_reduction_pct = v;
        }
        if let Some(v) = rl.medium_reduction_pct {
            log::info!("resource limit medium_reduction_pct overridden: {v}");
            self.resource_limits.medium_reduction_pct = v;
        }
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
