//! kosva: validate Kubecost recommendations against safety policies.
//!
//! Reads recommendations from a JSON file or the Kubecost API, evaluates each
//! against declarative policies (and/or the built-in checks), and prints a
//! report. Blocked recommendations are a reported outcome, not a failure:
//! the exit code is non-zero only when inputs or policies cannot be loaded.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use kosva::config::{Config, expand_path};
use kosva::eval::{StrategyMode, Validator};
use kosva::model::RecommendationList;
use kosva::{logging, policy, report, source};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "kosva", version, about)]
#[command(group(
    clap::ArgGroup::new("input")
        .required(true)
        .args(["recommendations", "kubecost_url"]),
))]
struct Cli {
    /// Recommendations JSON file (internal or Kubecost format).
    #[arg(short, long, value_name = "FILE")]
    recommendations: Option<String>,

    /// Kubecost base URL to fetch recommendations from.
    #[arg(long, value_name = "URL")]
    kubecost_url: Option<String>,

    /// Directory of policy documents (.yaml, .yml, .toml).
    #[arg(short, long, value_name = "DIR")]
    policies: Option<String>,

    /// Strategy selection; overrides the configured one.
    #[arg(long, value_enum)]
    strategy: Option<StrategyMode>,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Config overlay file (default: ~/.config/kosva/config.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Append verdicts to this file (overrides `settings.verdict_log`).
    #[arg(long, value_name = "FILE")]
    verdict_log: Option<String>,

    /// Increase diagnostic output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kosva: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> kosva::Result<()> {
    let config_path = cli.config.as_deref().and_then(expand_path);
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(mode) = cli.strategy {
        config.settings.strategy = mode;
    }

    // Policies must be fully loaded before any evaluation.
    let policy_dir: Option<PathBuf> = match cli.policies.as_deref() {
        Some(dir) => expand_path(dir),
        None => config.settings.policy_dir(),
    };
    let policies = match policy_dir {
        Some(dir) => Some(Arc::new(policy::load_policies(&dir)?)),
        None => None,
    };
    let validator = Validator::from_config(&config, policies)?;

    let list: RecommendationList = match (&cli.recommendations, &cli.kubecost_url) {
        (Some(file), _) => {
            let path = expand_path(file).unwrap_or_else(|| PathBuf::from(file));
            source::load_recommendations(&path)?
        }
        (None, Some(url)) => source::Client::new(url.as_str())?.recommendations()?,
        (None, None) => unreachable!("clap requires one input source"),
    };
    log::info!("validating {} recommendations", list.recommendations.len());

    let results = validator.validate_all(&list.recommendations);
    for result in &results {
        if let Some(check) = result.first_failure() {
            log::info!("blocked {}: {}", result.workload, check.check_name);
        }
    }

    match cli.format {
        Format::Text => print!("{}", report::render_text(&results)),
        Format::Json => match report::render_json(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("failed to serialize report: {e}"),
        },
    }

    if let Some(path) = verdict_log_path(&cli, &config) {
        logging::log_verdicts(&path, &results);
    }
    Ok(())
}

/// The verdict log is written only when a path is configured or passed.
fn verdict_log_path(cli: &Cli, config: &Config) -> Option<PathBuf> {
    match cli.verdict_log.as_deref() {
        Some(raw) => expand_path(raw),
        None => config.settings.verdict_log(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verdict_log_is_opt_in() {
        let cli = parse(&["kosva", "-r", "recs.json"]);
        assert_eq!(verdict_log_path(&cli, &Config::default_config()), None);
    }

    #[test]
    fn verdict_log_flag_enables_it() {
        let cli = parse(&["kosva", "-r", "recs.json", "--verdict-log", "/tmp/kosva.log"]);
        assert_eq!(
            verdict_log_path(&cli, &Config::default_config()),
            Some(PathBuf::from("/tmp/kosva.log"))
        );
    }

    #[test]
    fn exactly_one_input_source() {
        assert!(Cli::try_parse_from(["kosva"]).is_err());
        assert!(
            Cli::try_parse_from(["kosva", "-r", "recs.json", "--kubecost-url", "http://kc"])
                .is_err()
        );
    }

    #[test]
    fn strategy_flag_parses() {
        let cli = parse(&["kosva", "-r", "recs.json", "--strategy", "declarative"]);
        assert_eq!(cli.strategy, Some(StrategyMode::Declarative));
        assert_eq!(cli.format, Format::Text);
    }
}
