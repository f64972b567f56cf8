use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

const DEEP: &str = "if a:\n    for b in c:\n        while d:\n            try:\n                pass\n            except E:\n                pass\n";

fn pyqual() -> Command {
    let mut cmd = Command::cargo_bin("pyqual").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_analyze_json_output() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("deep.py"), DEEP).unwrap();

    let output = pyqual()
        .args(["analyze", "--format", "json"])
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["issues"], 1);
    assert_eq!(value["issues"][0]["line"], 4);
    assert_eq!(value["issues"][0]["rule_key"]["rule"], "NestedControlFlowDepth");
}

#[test]
fn test_fail_on_issues_sets_exit_code() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("deep.py"), DEEP).unwrap();

    pyqual()
        .args(["analyze", "--fail-on-issues"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(1);

    pyqual()
        .args(["analyze", "--fail-on-issues", "--max-depth", "4"])
        .arg(temp.path())
        .assert()
        .success();
}

#[test]
fn test_report_options_and_output_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("app.py"), "x = 1\n").unwrap();
    fs::create_dir_all(temp.path().join("lint")).unwrap();
    fs::write(
        temp.path().join("lint/pylint.txt"),
        "app.py:1: [C0114(missing-module-docstring), ] Missing module docstring\n",
    )
    .unwrap();
    fs::write(
        temp.path().join(".pyqual.toml"),
        "[report]\nrules = [{ id = \"C0114\" }]\n",
    )
    .unwrap();
    let out = temp.path().join("result.json");

    pyqual()
        .args([
            "analyze",
            "--report-path",
            "lint/*.txt",
            "--report-format",
            "parseable-v1",
            "--repository",
            "external",
            "--format",
            "json",
            "--output",
        ])
        .arg(&out)
        .arg(temp.path())
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["issues"][0]["rule_key"]["repository"], "external");
    assert_eq!(value["issues"][0]["rule_key"]["rule"], "C0114");
    assert_eq!(value["issues"][0]["severity"], "major");
}

#[test]
fn test_terminal_output_lists_issue() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("deep.py"), DEEP).unwrap();

    let output = pyqual().arg("analyze").arg(temp.path()).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("deep.py:4 [python:NestedControlFlowDepth] (Critical)"));
    assert!(stdout.contains("1 issue(s)"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bad.toml");
    fs::write(&config, "[nesting]\nmax_depth = 0\n").unwrap();

    pyqual()
        .args(["analyze", "--config"])
        .arg(&config)
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn test_init_creates_and_protects_config() {
    let temp = TempDir::new().unwrap();

    pyqual()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success();
    assert!(temp.path().join(".pyqual.toml").exists());

    pyqual()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .failure();

    pyqual()
        .current_dir(temp.path())
        .args(["init", "--force"])
        .assert()
        .success();
}
