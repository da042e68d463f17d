//! Rendering verdicts for operators: console text or JSON.

use std::fmt::Write;

use serde::Serialize;

use crate::eval::ValidationResult;

const RULE_WIDTH: usize = 70;

/// Savings totals across a batch of verdicts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub approved: usize,
    pub blocked: usize,
    pub total_savings: f64,
    pub safe_savings: f64,
    pub blocked_savings: f64,
    pub safe_percentage: f64,
}

impl Summary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let mut s = Summary {
            total: results.len(),
            ..Default::default()
        };
        for r in results {
            s.total_savings += r.savings;
            if r.approved {
                s.approved += 1;
                s.safe_savings += r.savings;
            } else {
                s.blocked += 1;
                s.blocked_savings += r.savings;
            }
        }
        s.safe_percentage = safe_percentage(s.safe_savings, s.total_savings);
        s
    }
}

/// Share of savings judged safe, in percent. Zero when there is nothing to save.
pub fn safe_percentage(safe: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        safe / total * 100.0
    }
}

/// Human-readable console report.
pub fn render_text(results: &[ValidationResult]) -> String {
    let summary = Summary::from_results(results);
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "\n{heavy}\n  KOSVA VALIDATION REPORT\n{heavy}");
    let _ = writeln!(out, "\nTotal Recommendations: {}", summary.total);
    let _ = writeln!(out, "Potential Savings: ${:.0}/month\n", summary.total_savings);

    if summary.approved > 0 {
        let _ = writeln!(out, "SAFE RECOMMENDATIONS ({}):\n{light}", summary.approved);
        for (i, r) in results.iter().filter(|r| r.approved).enumerate() {
            let _ = writeln!(out, "{}. {} -> ${:.0}/month", i + 1, r.workload, r.savings);
            let _ = writeln!(out, "   Type: {} | Max Risk: {:.1}/10", r.kind, r.max_risk());
            for check in &r.checks {
                let _ = writeln!(
                    out,
                    "   [{}] {} (Risk: {:.1}/10)\n          {}",
                    check.label(),
                    check.check_name,
                    check.risk_score,
                    check.message
                );
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Safe Savings: ${:.0}/month\n", summary.safe_savings);
    }

    if summary.blocked > 0 {
        let _ = writeln!(out, "BLOCKED RECOMMENDATIONS ({}):\n{light}", summary.blocked);
        for (i, r) in results.iter().filter(|r| !r.approved).enumerate() {
            let _ = writeln!(
                out,
                "{}. {} -> Would save ${:.0}/month",
                i + 1,
                r.workload,
                r.savings
            );
            let _ = writeln!(out, "   Type: {} | Max Risk: {:.1}/10", r.kind, r.max_risk());
            for check in &r.checks {
                let _ = writeln!(
                    out,
                    "   [{}] {} [{}] (Risk: {:.1}/10)\n          {}\n          Remediation: {}",
                    check.label(),
                    check.check_name,
                    check.severity,
                    check.risk_score,
                    check.message,
                    check.remediation
                );
            }
            if let Some(alt) = &r.alternative {
                let _ = writeln!(out, "\n   SAFE ALTERNATIVE:\n   {alt}");
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Blocked Savings: ${:.0}/month\n", summary.blocked_savings);
    }

    let _ = writeln!(
        out,
        "{heavy}\nSUMMARY: ${:.0}/${:.0} safe ({:.0}% of potential savings)\n{heavy}",
        summary.safe_savings, summary.total_savings, summary.safe_percentage
    );
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    results: &'a [ValidationResult],
}

/// Machine-readable report: `{ "summary": ..., "results": [...] }`.
pub fn render_json(results: &[ValidationResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        summary: Summary::from_results(results),
        results,
    })
}
