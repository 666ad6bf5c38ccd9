//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pipeline"))
        .stdout(predicate::str::contains("exec"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vaultform"));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vaultform"));
}

#[test]
fn test_errors_go_to_stderr_with_hint() {
    let t = Test::new();

    let output = t.cmd().arg("fetch").output().unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "✗");
    assert_stderr_contains(&output, "missing required field: vault.address");
    assert_stdout_contains(&output, "export VAULT_ADDR");
}

#[test]
fn test_explicit_config_must_exist() {
    let t = Test::new();

    t.cmd()
        .args(["--config", "missing.toml", "fetch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn test_config_path_from_environment() {
    let t = Test::new();
    t.write(
        "ci/vaultform.toml",
        "[vault]\naddress = \"https://vault.example.com\"\nsecret_path = \"kv/data/ci\"\n",
    );

    t.cmd()
        .env("VAULTFORM_CONFIG", "ci/vaultform.toml")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("kv/data/ci"));
}
