use std::io::Write;
use std::path::Path;

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use crate::eval::ValidationResult;

/// Install the stderr diagnostics logger.
/// Verbosity 0 = warn, 1 = info, 2+ = debug.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Off)
        .build();
    // Already initialized (e.g. in tests) is fine.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Append one record per verdict to the verdict log at `path`.
/// Best-effort: failures are logged at debug and otherwise ignored.
pub fn log_verdicts(path: &Path, results: &[ValidationResult]) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let mut file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(f) => f,
        Err(e) => {
            log::debug!("verdict log {} unavailable: {e}", path.display());
            return;
        }
    };

    let ts = timestamp_now();
    for result in results {
        let _ = writeln!(file, "{}", verdict_line(&ts, result));
    }
}

/// `ts \t APPROVED|BLOCKED \t type \t workload \t savings \t checks`
fn verdict_line(ts: &str, result: &ValidationResult) -> String {
    let checks = result
        .checks
        .iter()
        .map(|c| format!("{}:{}:{:.1}", c.label(), c.check_name, c.risk_score))
        .collect::<Vec<_>>()
        .join("; ");
    let workload: String = result.workload.chars().take(200).collect();
    format!(
        "{ts}\t{verdict}\t{kind}\t{workload}\t{savings:.2}\t{checks}",
        verdict = result.label(),
        kind = result.kind,
        savings = result.savings,
    )
}

/// Simple UTC timestamp without external deps.
fn timestamp_now() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let days = secs / 86400;
    let rem = secs % 86400;
    let h = rem / 3600;
    let m = (rem % 3600) / 60;
    let s = rem % 60;
    let (year, month, day) = epoch_days_to_date(days);
    format!("{year:04}-{month:02}-{day:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_date(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days algorithm (Howard Hinnant)
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
