use std::path::{Path, PathBuf};
use std::sync::Arc;

use kosva::config::Config;
use kosva::eval::{Severity, StrategyMode, ValidationResult, Validator};
use kosva::model::{Recommendation, RecommendationKind};
use kosva::policy::{self, PolicySet};
use kosva::report::{self, Summary};
use kosva::source;

fn root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> PathBuf {
    root().join("tests/fixtures").join(name)
}

fn shipped_policies() -> Arc<PolicySet> {
    Arc::new(policy::load_policies(&root().join("policies")).unwrap())
}

fn declarative() -> Validator {
    Validator::from_config(&Config::default_config(), Some(shipped_policies())).unwrap()
}

fn spot(workload: &str, namespace: &str) -> Recommendation {
    Recommendation::new("spot-instance", workload, namespace, 1000.0)
}

fn deploy_spot(name: &str, namespace: &str) -> Recommendation {
    spot(&format!("deployment/{name}"), namespace)
}

fn other(kind: &str) -> Recommendation {
    Recommendation::new(kind, "deployment/web", "shared", 10.0)
}

fn right_size(current: &str, recommended: &str) -> Recommendation {
    Recommendation::new("right-size", "deployment/web", "default", 100.0)
        .with_memory(current, recommended)
}

fn verdict_for(rec: &Recommendation) -> ValidationResult {
    kosva::validate(rec)
}

macro_rules! verdict_test {
    ($name:ident, $rec:expr, $approved:expr, $sev:ident, $risk:expr) => {
        #[test]
        fn $name() {
            let rec = $rec;
            let r = verdict_for(&rec);
            assert_eq!(r.approved, $approved, "recommendation: {rec:?}");
            assert_eq!(r.checks.len(), 1, "fixed checks yield one outcome");
            assert_eq!(r.checks[0].severity, Severity::$sev);
            assert_eq!(r.checks[0].risk_score, $risk);
        }
    };
}

// ── Fixed checks: spot-instance ──

verdict_test!(spot_payment_prod, deploy_spot("payment-api", "production"), false, High, 8.5);
verdict_test!(spot_auth_service, deploy_spot("auth-service", "dev"), false, High, 8.5);
verdict_test!(spot_upper_keyword, spot("Deployment/BILLING-sync", "dev"), false, High, 8.5);
verdict_test!(spot_prod_namespace, deploy_spot("thumbnailer", "prod-eu"), false, Medium, 6.5);
verdict_test!(spot_dev_batch, deploy_spot("batch-worker", "dev"), true, Low, 2.0);

// ── Fixed checks: right-size ──

verdict_test!(right_size_75_pct, right_size("2048Mi", "512Mi"), false, High, 7.5);
verdict_test!(right_size_40_pct, right_size("1000Mi", "600Mi"), false, Medium, 5.0);
verdict_test!(right_size_20_pct, right_size("1000Mi", "800Mi"), true, Low, 1.5);
verdict_test!(right_size_gi_to_mi, right_size("1Gi", "900Mi"), true, Low, 1.5);

// ── Unknown type ──

verdict_test!(unknown_type_is_informational, other("multi-tenancy"), true, Info, 0.0);

#[test]
fn blocked_spot_suggests_reserved_capacity() {
    let r = verdict_for(&spot("deployment/payment-api", "production"));
    let alt = r.alternative.expect("blocked verdict carries an alternative");
    assert!(alt.contains("reserved capacity"), "{alt}");
    assert!(alt.contains("$300"), "30% of 1000: {alt}");
}

#[test]
fn approved_verdict_has_no_alternative() {
    assert_eq!(verdict_for(&right_size("1000Mi", "800Mi")).alternative, None);
}

// ── Declarative policies shipped in policies/ ──

#[test]
fn shipped_policies_skip_disabled() {
    let set = shipped_policies();
    assert_eq!(set.enabled_count(), 2);
    assert!(!set.covers(&RecommendationKind::from("storage-security")));
}

#[test]
fn declarative_spot_reports_every_firing_rule() {
    let r = declarative().validate(&spot("deployment/payment-api", "production"));
    assert!(!r.approved);
    let names: Vec<_> = r.checks.iter().map(|c| c.check_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Spot Instance Safety - Critical workload on spot",
            "Spot Instance Safety - Production namespace on spot",
        ]
    );
    assert!(r.checks.iter().all(|c| c.severity == Severity::High));
}

#[test]
fn declarative_condition_is_case_insensitive() {
    let r = declarative().validate(&spot("Payment-API-Deployment", "dev"));
    assert!(!r.approved);
    assert_eq!(r.checks[0].risk_score, 8.5);
}

#[test]
fn declarative_warn_rule_does_not_block() {
    let r = declarative().validate(&spot("node/ip-10-0-3-17", "kube-system"));
    assert!(r.approved);
    assert_eq!(r.checks.len(), 1);
    assert!(r.checks[0].passed);
    assert_eq!(r.checks[0].risk_score, 4.0);
}

#[test]
fn declarative_regex_rule_blocks_statefulsets() {
    let rec = Recommendation::new("right-size", "StatefulSet/redis", "data", 13.0)
        .with_memory("1Gi", "900Mi");
    let r = declarative().validate(&rec);
    assert!(!r.approved);
    // Both the regex rule and the data-tier rule fire.
    assert_eq!(r.checks.len(), 2);
    assert!(r.alternative.unwrap().contains("25%"));
}

#[test]
fn uncovered_type_falls_back_to_informational_under_auto() {
    let rec = Recommendation::new("storage-security", "pvc/data", "default", 50.0);
    let r = declarative().validate(&rec);
    assert!(r.approved);
    assert_eq!(r.checks[0].severity, Severity::Info);
}

#[test]
fn fixed_mode_ignores_shipped_policies() {
    let mut config = Config::default_config();
    config.settings.strategy = StrategyMode::Fixed;
    let v = Validator::from_config(&config, Some(shipped_policies())).unwrap();
    let r = v.validate(&spot("deployment/payment-api", "production"));
    assert_eq!(r.checks.len(), 1);
    assert_eq!(r.checks[0].check_name, "CIS 5.7 - Spot Instance Suitability");
}

#[test]
fn evaluation_is_idempotent() {
    let v = declarative();
    let recs = vec![
        spot("deployment/payment-api", "production"),
        spot("node/a", "kube-system"),
        right_size("2048Mi", "512Mi"),
    ];
    assert_eq!(v.validate_all(&recs), v.validate_all(&recs));
}

#[test]
fn validator_is_shareable_across_threads() {
    let v = Arc::new(declarative());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let v = Arc::clone(&v);
            std::thread::spawn(move || v.validate(&spot("deployment/payment-api", "production")))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

// ── Sources and reporting ──

#[test]
fn internal_fixture_summary() {
    let list = source::load_recommendations(&fixture("recommendations.json")).unwrap();
    let results = Validator::fixed_only().validate_all(&list.recommendations);
    let approved: Vec<_> = results.iter().map(|r| r.approved).collect();
    assert_eq!(approved, vec![true, true, false]);

    let summary = Summary::from_results(&results);
    assert_eq!(summary.total_savings, 2100.0);
    assert_eq!(summary.safe_savings, 900.0);
    assert!((summary.safe_percentage - 42.857).abs() < 0.01);

    let text = report::render_text(&results);
    assert!(text.contains("SUMMARY: $900/$2100 safe (43% of potential savings)"));
}

#[test]
fn kubecost_fixture_translation_and_verdicts() {
    let list = source::load_recommendations(&fixture("kubecost-savings.json")).unwrap();
    let kinds: Vec<_> = list.recommendations.iter().map(|r| r.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            RecommendationKind::RightSize,
            RecommendationKind::RightSize,
            RecommendationKind::SpotInstance,
        ]
    );

    let results = Validator::fixed_only().validate_all(&list.recommendations);
    // cart: 2048 -> 512 MB is a 75% cut.
    assert!(!results[0].approved);
    // redis: 1024 -> 900 MB is ~12%.
    assert!(results[1].approved);
    // node in kube-system, no critical keyword.
    assert!(results[2].approved);
}

#[test]
fn json_report_round_trips_through_serde() {
    let list = source::load_recommendations(&fixture("recommendations.json")).unwrap();
    let results = Validator::fixed_only().validate_all(&list.recommendations);
    let json = report::render_json(&results).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["total"], 3);
    assert_eq!(value["results"][2]["checks"][0]["severity"], "HIGH");
}
