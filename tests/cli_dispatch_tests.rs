use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_emax")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("emax-{name}-{stamp}.{extension}"))
}

#[test]
fn evaluate_with_fixtures_prints_one_finite_scalar() {
    let output = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "data/draws.json"])
        .output()
        .expect("evaluate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "expected exactly one output line");
    let value: f64 = lines[0].trim().parse().expect("output should be a float");
    assert!(value.is_finite());
}

#[test]
fn evaluate_without_args_uses_default_fixture() {
    let output = Command::new(bin())
        .arg("evaluate")
        .output()
        .expect("evaluate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: f64 = stdout.trim().parse().expect("output should be a float");
    assert!(value.is_finite());
}

#[test]
fn evaluate_is_idempotent_for_fixed_inputs() {
    let run = || {
        Command::new(bin())
            .args(["evaluate", "data/scenario.json", "data/draws.json"])
            .output()
            .expect("evaluate should run")
    };
    let first = run();
    let second = run();
    assert_eq!(first.status.code(), Some(0));
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn evaluate_missing_draws_file_fails() {
    let output = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "no/such/draws.json"])
        .output()
        .expect("evaluate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot read draws file"));
}

#[test]
fn evaluate_rejects_mismatched_vector_lengths() {
    let scenario = r#"{
        "wages": [10.0, 20.0, 1.0],
        "nonpecs": [0.0, 0.0],
        "continuation_values": [100.0, 200.0, 300.0],
        "delta": 0.9
    }"#;
    let path = unique_temp_path("bad-scenario", "json");
    fs::write(&path, scenario).unwrap();

    let output = Command::new(bin())
        .args(["evaluate", path.to_str().unwrap(), "data/draws.json"])
        .output()
        .expect("evaluate should run");
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nonpecs"));
}

#[test]
fn evaluate_json_reports_choice_probabilities() {
    let output = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "data/draws.json", "--json"])
        .output()
        .expect("evaluate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("evaluate --json should emit json");
    assert!(payload["expected_value"].is_number());
    assert_eq!(
        payload["choice_probabilities"].as_array().map(Vec::len),
        Some(4)
    );
    assert_eq!(payload["n_draws"], 200);
}

#[test]
fn parallel_flag_matches_sequential_output() {
    let sequential = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "data/draws.json"])
        .output()
        .expect("evaluate should run");
    let parallel = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "data/draws.json", "--parallel"])
        .output()
        .expect("evaluate should run");

    assert_eq!(sequential.status.code(), Some(0));
    assert_eq!(parallel.status.code(), Some(0));
    assert_eq!(sequential.stdout, parallel.stdout);
}

#[test]
fn workers_flag_matches_sequential_output() {
    let sequential = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "data/draws.json"])
        .output()
        .expect("evaluate should run");
    let fixed_workers = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "data/draws.json", "--workers", "2"])
        .output()
        .expect("evaluate should run");

    assert_eq!(fixed_workers.status.code(), Some(0));
    assert_eq!(sequential.stdout, fixed_workers.stdout);
}

#[test]
fn workers_flag_rejects_garbage_and_missing_values() {
    let garbage = Command::new(bin())
        .args(["evaluate", "--workers", "lots"])
        .output()
        .expect("evaluate should run");
    assert_eq!(garbage.status.code(), Some(2));

    let missing = Command::new(bin())
        .args(["evaluate", "--workers"])
        .output()
        .expect("evaluate should run");
    assert_eq!(missing.status.code(), Some(2));
}

#[test]
fn draws_command_generates_reproducible_fixture() {
    let first_path = unique_temp_path("draws-a", "json");
    let second_path = unique_temp_path("draws-b", "json");

    for path in [&first_path, &second_path] {
        let output = Command::new(bin())
            .args(["draws", path.to_str().unwrap(), "150", "7", "data/scenario.json"])
            .output()
            .expect("draws should run");
        assert_eq!(output.status.code(), Some(0));
    }

    let first = fs::read_to_string(&first_path).unwrap();
    let second = fs::read_to_string(&second_path).unwrap();
    assert_eq!(first, second, "same seed must produce the same fixture");

    let output = Command::new(bin())
        .args(["evaluate", "data/scenario.json", first_path.to_str().unwrap()])
        .output()
        .expect("evaluate should run");
    assert_eq!(output.status.code(), Some(0));

    fs::remove_file(&first_path).ok();
    fs::remove_file(&second_path).ok();
}

#[test]
fn export_then_evaluate_csv_draws_matches_json_draws() {
    let csv_path = unique_temp_path("draws", "csv");
    let output = Command::new(bin())
        .args(["export", "data/draws.json", csv_path.to_str().unwrap()])
        .output()
        .expect("export should run");
    assert_eq!(output.status.code(), Some(0));

    let from_json = Command::new(bin())
        .args(["evaluate", "data/scenario.json", "data/draws.json"])
        .output()
        .expect("evaluate should run");
    let from_csv = Command::new(bin())
        .args(["evaluate", "data/scenario.json", csv_path.to_str().unwrap()])
        .output()
        .expect("evaluate should run");
    fs::remove_file(&csv_path).ok();

    assert_eq!(from_csv.status.code(), Some(0));
    assert_eq!(from_json.stdout, from_csv.stdout);
}

#[test]
fn validate_command_passes_on_fixtures() {
    let output = Command::new(bin())
        .args(["validate", "data/scenario.json", "data/draws.json"])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}

#[test]
fn validate_flags_delta_out_of_range() {
    let scenario = r#"{
        "wages": [1.0, 1.0],
        "nonpecs": [0.0, 0.0],
        "continuation_values": [10.0, 20.0],
        "delta": 1.5
    }"#;
    let path = unique_temp_path("bad-delta", "json");
    fs::write(&path, scenario).unwrap();

    let output = Command::new(bin())
        .args(["validate", path.to_str().unwrap(), "data/draws.json"])
        .output()
        .expect("validate should run");
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("delta"));
}

#[test]
fn unknown_command_returns_usage() {
    let output = Command::new(bin())
        .arg("simulate")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: emax"));
}
