mod common;

use common::*;
use std::process::Command;

fn cli_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_directions-runner"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_cli_help() {
    let output = cli_command().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Run step-by-step directions asynchronously"));
    assert!(stdout.contains("step"));
    assert!(stdout.contains("scatter"));
    assert!(stdout.contains("chain"));
    assert!(stdout.contains("all"));
    assert!(stdout.contains("patches"));
    assert!(stdout.contains("--delay-ms"));
    assert!(stdout.contains("--random"));
}

#[test]
fn test_cli_version() {
    let output = cli_command().arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("directions-runner"));
}

#[test]
fn test_cli_chain_help() {
    let output = cli_command().args(["chain", "--help"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stopping at the first failure"));
}

#[test]
fn test_cli_step() {
    let output = cli_command()
        .args(["step", "1", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["← Head northwest on Bd Voltaire toward Rue Léon Frot"]
    );
}

#[test]
fn test_cli_step_not_found() {
    let output = cli_command()
        .args(["step", "4", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec!["undefined", "Instructions not found."]
    );
}

#[test]
fn test_cli_negative_index_rejected() {
    let output = cli_command()
        .args(["step", "--delay-ms", "0", "--", "-1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_chain_arrives() {
    let output = cli_command()
        .args(["chain", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "Starting point: Ironhack Paris",
            "← Head northwest on Bd Voltaire toward Rue Léon Frot",
            "← Turn left onto Rue Chanzy",
            "* Café Titon, 34 Rue Titon, 75011 Paris, France",
            "You arrived at the café!",
            "Final log",
        ]
    );
}

#[test]
fn test_cli_chain_stops_at_missing_step() {
    let output = cli_command()
        .args(["chain", "0", "4", "1", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        vec![
            "Starting point: Ironhack Paris",
            "undefined",
            "Instructions not found.",
            "Final log",
        ]
    );
}

#[test]
fn test_cli_all() {
    let (_dir, config) = fast_random_config();
    let output = cli_command()
        .args(["all", "--random", "--config"])
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[4].starts_with("values: [\"Starting point: Ironhack Paris\""));
}

#[test]
fn test_cli_all_fails_on_missing_step() {
    let output = cli_command()
        .args(["all", "0", "9", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Instructions not found."));
    assert!(!stdout.contains("values:"));
}

#[test]
fn test_cli_scatter() {
    let output = cli_command()
        .args(["scatter", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let mut lines = stdout_lines(&output);
    lines.sort();
    let mut expected = directions();
    expected.sort();
    assert_eq!(lines, expected);
}

#[test]
fn test_cli_scatter_reports_failure_with_its_step() {
    let output = cli_command()
        .args(["scatter", "0", "6", "1", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    let missing = lines.iter().position(|line| line == "undefined").unwrap();
    assert_eq!(lines[missing + 1], "Instructions not found.");
}

#[test]
fn test_cli_custom_steps_file() {
    let dir = create_test_dir();
    let steps = write_file(dir.path(), "steps.yaml", "- Leave home\n- Arrive\n");

    let output = cli_command()
        .args(["chain", "--delay-ms", "0", "--steps"])
        .arg(&steps)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["Leave home", "Arrive", "You arrived at the café!", "Final log"]
    );
}

#[test]
fn test_cli_json_output() {
    let output = cli_command()
        .args(["step", "0", "--delay-ms", "0", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    let event: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(event["type"], "STEP");
    assert_eq!(event["index"], 0);
    assert_eq!(event["text"], "Starting point: Ironhack Paris");
}

#[test]
fn test_cli_missing_config() {
    let output = cli_command()
        .args(["chain", "--config", "/nonexistent/runner.yaml"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"));
}

#[test]
fn test_cli_delay_conflicts_with_random() {
    let output = cli_command()
        .args(["chain", "--delay-ms", "0", "--random"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}

/// Config with a tiny random delay range, kept alive with its temp dir
fn fast_random_config() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = create_test_dir();
    let path = write_file(
        dir.path(),
        "runner.yaml",
        "delay:\n  mode: random\n  min_ms: 1\n  max_ms: 20\n",
    );
    (dir, path)
}
