//! End-to-end checks of the `rnts` binary that stop before any generator runs

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rnts() -> Command {
    let mut cmd = Command::cargo_bin("rnts").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("RNTS_GENERATOR")
        .env_remove("RNTS_PACKAGE_MANAGER")
        .env_remove("RNTS_TEMPLATE_DIR")
        .env_remove("RNTS_COMMAND_TIMEOUT");
    cmd
}

#[test]
fn test_help_lists_flags() {
    rnts()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--vscode-tasks"))
        .stdout(predicate::str::contains("--skip-install"))
        .stdout(predicate::str::contains("<PROJECT_NAME>"));
}

#[test]
fn test_version_flag() {
    rnts()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_project_name_is_required() {
    rnts().assert().failure();
}

#[test]
fn test_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    rnts()
        .args(["1st-app", temp.path().to_str().unwrap(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn test_existing_project_is_refused() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("AwesomeApp")).unwrap();

    rnts()
        .args(["AwesomeApp", temp.path().to_str().unwrap(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Nothing was touched
    assert_eq!(
        std::fs::read_dir(temp.path().join("AwesomeApp")).unwrap().count(),
        0
    );
}

#[test]
fn test_missing_parent_is_refused() {
    let temp = TempDir::new().unwrap();
    rnts()
        .args(["AwesomeApp", temp.path().join("nope").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_unknown_package_manager_is_rejected() {
    rnts()
        .args(["AwesomeApp", "--package-manager", "pnpm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pnpm"));
}
