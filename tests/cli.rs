//! Command line tests for the evalboard binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const RESULTS: &str = r#"[
    {"model": "A", "question": "q1", "prediction": "p1", "relevance_score": 9, "accuracy_score": 7, "latency": 1.0},
    {"model": "A", "question": "q2", "prediction": "p2", "relevance_score": 7, "accuracy_score": 9, "latency": 3.0},
    {"model": "B", "question": "q3", "prediction": "p3", "relevance_score": 6, "accuracy_score": 6, "latency": 0.5}
]"#;

fn workspace_with_results() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("results.json"), RESULTS).unwrap();
    dir
}

fn evalboard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("evalboard").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("EVALBOARD_CONFIG")
        .env_remove("EVALBOARD_SOURCE")
        .env_remove("EVALBOARD_OUTPUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_render_writes_site() {
    let dir = workspace_with_results();

    evalboard(&dir)
        .args(["render", "--title", "CLI Run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html"));

    let html = fs::read_to_string(dir.path().join("dashboard/index.html")).unwrap();
    assert!(html.contains("<title>CLI Run</title>"));
    assert!(html.contains(r#"id="fastest-model-name">B<"#));
}

#[test]
fn test_render_missing_results_writes_error_page_and_fails() {
    let dir = tempfile::tempdir().unwrap();

    evalboard(&dir)
        .args(["render", "--output", "site"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error loading benchmark data"));

    let html = fs::read_to_string(dir.path().join("site/index.html")).unwrap();
    assert!(html.contains("Please ensure results.json exists."));
}

#[test]
fn test_summary_lists_kpis() {
    let dir = workspace_with_results();

    evalboard(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fastest Model"))
        .stdout(predicate::str::contains("0.50s"))
        .stdout(predicate::str::contains("8.00"));
}

#[test]
fn test_summary_json() {
    let dir = workspace_with_results();

    let output = evalboard(&dir)
        .args(["summary", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kpis"]["fastest"]["name"], "B");
    assert_eq!(report["models"]["A"]["count"], 2);
    assert_eq!(report["summary"]["total_records"], 3);
}

#[test]
fn test_table_filters_by_model() {
    let dir = workspace_with_results();

    evalboard(&dir)
        .args(["table", "--model", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("q3"))
        .stdout(predicate::str::contains("q1").not());
}

#[test]
fn test_table_all_model_value_lists_every_row() {
    let dir = workspace_with_results();

    evalboard(&dir)
        .args(["table", "--model", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("q1"))
        .stdout(predicate::str::contains("q3"))
        .stdout(predicate::str::contains("No matching results.").not());
}

#[test]
fn test_config_file_sets_source() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("runs")).unwrap();
    fs::write(dir.path().join("runs/nightly.json"), RESULTS).unwrap();
    fs::write(
        dir.path().join("evalboard.toml"),
        "source = \"runs/nightly.json\"\ntheme = \"light\"\n",
    )
    .unwrap();

    evalboard(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("runs/nightly.json"))
        .stdout(predicate::str::contains("theme = \"light\""));

    evalboard(&dir).arg("summary").assert().success();
}
