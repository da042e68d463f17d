use crate::checks::CheckSpec;
use crate::config::ResourceLimitConfig;
use crate::eval::{CheckResult, RiskTier};
use crate::model::{Recommendation, memory_mb_lenient};

pub const CHECK_NAME: &str = "CIS 5.10 - Resource Limit Safety";

/// Memory-reduction safety for right-sizing.
///
/// Reduction above `high_reduction_pct` → FAIL (HIGH), above
/// `medium_reduction_pct` → FAIL (MEDIUM), otherwise PASS (LOW).
pub struct ResourceLimitCheck {
    high_reduction_pct: f64,
    medium_reduction_pct: f64,
}

impl ResourceLimitCheck {
    pub fn from_config(config: &ResourceLimitConfig) -> Self {
        Self {
            high_reduction_pct: config.high_reduction_pct,
            medium_reduction_pct: config.medium_reduction_pct,
        }
    }
}

/// Percentage by which memory shrinks from `current` to `recommended`.
/// Zero when `current` is zero; negative when memory grows.
pub fn reduction_pct(current_mb: u64, recommended_mb: u64) -> f64 {
    if current_mb == 0 {
        return 0.0;
    }
    (current_mb as f64 - recommended_mb as f64) / current_mb as f64 * 100.0
}

impl CheckSpec for ResourceLimitCheck {
    fn evaluate(&self, rec: &Recommendation) -> CheckResult {
        let current = memory_mb_lenient(&rec.current.memory);
        let recommended = memory_mb_lenient(&rec.recommended.memory);
        let reduction = reduction_pct(current, recommended);

        if reduction > self.high_reduction_pct {
            return CheckResult::fail(
                RiskTier::REDUCTION_SEVERE,
                CHECK_NAME,
                format!(
                    "Memory reduction of {reduction:.0}% exceeds {:.0}%. High risk of OOM kills and service disruption.",
                    self.high_reduction_pct
                ),
                "Reduce gradually (25-30% per step) and watch for OOM events.",
            );
        }

        if reduction > self.medium_reduction_pct {
            return CheckResult::fail(
                RiskTier::REDUCTION_MODERATE,
                CHECK_NAME,
                format!("Memory reduction of {reduction:.0}% carries moderate risk."),
                "Roll out gradually and monitor memory usage closely.",
            );
        }

        CheckResult::pass(
            RiskTier::REDUCTION_SAFE,
            CHECK_NAME,
            format!(
                "Memory reduction of {reduction:.0}% appears safe (<= {:.0}%).",
                self.medium_reduction_pct
            ),
            "Monitor memory usage for 1-2 weeks after the change.",
        )
    }
}
