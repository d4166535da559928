//! End-to-end drift check through the CLI command layer.

use std::fs;
use std::path::Path;

use vigilar::cli::{run_command, Verdict};
use vigilar::config::parse_args;
use vigilar::drift::{DriftReport, DriftStatus};
use vigilar::error::VigilarError;

fn write_feature_csv(path: &Path, name: &str, values: &[f64]) {
    let mut content = format!("{name}\n");
    for v in values {
        content.push_str(&format!("{v}\n"));
    }
    fs::write(path, content).unwrap();
}

/// The drift demo scenario: a 50x inflation of watch_minutes_7d must
/// fail the check, and reverting the current extract to the baseline
/// must pass with PSI 0.
#[test]
fn test_inflated_feature_fails_then_reverting_passes() {
    let dir = tempfile::tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.csv");
    let current_path = dir.path().join("current.csv");
    let report_path = dir.path().join("drift_report.json");

    let baseline: Vec<f64> = (0..500).map(|i| 80.0 + f64::from(i % 41)).collect();
    let inflated: Vec<f64> = baseline.iter().map(|v| v * 50.0).collect();

    write_feature_csv(&baseline_path, "watch_minutes_7d", &baseline);
    write_feature_csv(&current_path, "watch_minutes_7d", &inflated);

    let cli = parse_args([
        "vigilar",
        "--quiet",
        "drift",
        "--baseline",
        baseline_path.to_str().unwrap(),
        "--current",
        current_path.to_str().unwrap(),
        "--report",
        report_path.to_str().unwrap(),
    ])
    .unwrap();

    let verdict = run_command(cli).unwrap();
    assert_eq!(verdict, Verdict::DriftFail);

    let report: DriftReport =
        serde_json::from_slice(&fs::read(&report_path).unwrap()).unwrap();
    assert_eq!(report.status, DriftStatus::Fail);
    assert!(report.max_psi >= 0.25);
    assert_eq!(report.per_feature[0].name, "watch_minutes_7d");
    assert!(!report.per_feature[0].skipped);

    // Revert the current extract to match the baseline exactly.
    write_feature_csv(&current_path, "watch_minutes_7d", &baseline);
    let cli = parse_args([
        "vigilar",
        "--quiet",
        "drift",
        "--baseline",
        baseline_path.to_str().unwrap(),
        "--current",
        current_path.to_str().unwrap(),
        "--report",
        report_path.to_str().unwrap(),
    ])
    .unwrap();

    let verdict = run_command(cli).unwrap();
    assert_eq!(verdict, Verdict::Healthy);

    let report: DriftReport =
        serde_json::from_slice(&fs::read(&report_path).unwrap()).unwrap();
    assert_eq!(report.status, DriftStatus::Pass);
    assert_eq!(report.max_psi, 0.0);
}

/// A FAIL verdict and a broken input are different outcomes: the first
/// is an Ok(DriftFail), the second an error. Conflating them would
/// break alerting.
#[test]
fn test_fail_verdict_and_input_error_are_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.csv");
    write_feature_csv(&baseline_path, "f", &[1.0, 2.0, 3.0]);

    let cli = parse_args([
        "vigilar",
        "--quiet",
        "drift",
        "--baseline",
        baseline_path.to_str().unwrap(),
        "--current",
        dir.path().join("missing.csv").to_str().unwrap(),
    ])
    .unwrap();

    let err = run_command(cli).unwrap_err();
    assert!(matches!(err, VigilarError::Input { .. }));
    assert_eq!(err.code(), "E001");
}

/// A report still lands on disk when the verdict is FAIL.
#[test]
fn test_report_written_before_fail_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.csv");
    let current_path = dir.path().join("current.csv");
    let report_path = dir.path().join("report.json");

    write_feature_csv(&baseline_path, "f", &(0..100).map(f64::from).collect::<Vec<_>>());
    write_feature_csv(&current_path, "f", &(0..100).map(|i| f64::from(i) + 1e6).collect::<Vec<_>>());

    let cli = parse_args([
        "vigilar",
        "--quiet",
        "drift",
        "--baseline",
        baseline_path.to_str().unwrap(),
        "--current",
        current_path.to_str().unwrap(),
        "--report",
        report_path.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(run_command(cli).unwrap(), Verdict::DriftFail);
    assert!(report_path.is_file());
}

#[test]
fn test_skipped_feature_still_yields_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.csv");
    let current_path = dir.path().join("current.csv");

    fs::write(&baseline_path, "a,only_in_baseline\n1,9\n2,9\n3,9\n").unwrap();
    fs::write(&current_path, "a\n1\n2\n3\n").unwrap();

    let cli = parse_args([
        "vigilar",
        "--quiet",
        "drift",
        "--baseline",
        baseline_path.to_str().unwrap(),
        "--current",
        current_path.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(run_command(cli).unwrap(), Verdict::Healthy);
}

#[test]
fn test_invalid_thresholds_rejected_before_reading_files() {
    let cli = parse_args([
        "vigilar",
        "--quiet",
        "drift",
        "--baseline",
        "does-not-matter.csv",
        "--current",
        "does-not-matter.csv",
        "--warn",
        "0.5",
        "--fail",
        "0.1",
    ])
    .unwrap();

    let err = run_command(cli).unwrap_err();
    assert!(matches!(err, VigilarError::Config { .. }));
}
