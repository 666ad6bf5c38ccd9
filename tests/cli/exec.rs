//! Tests for `vaultform exec` command.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_exec_binds_access_key() {
    let t = Test::new();
    let vault = MockVault::standard();

    let output = t.exec(&vault, &["sh", "-c", "echo $AWS_ACCESS_KEY_ID"]);
    assert_exit_code(&output, 0);
    assert_eq!(stdout(&output), "AK\n");
}

#[cfg(unix)]
#[test]
fn test_exec_binds_secret_key() {
    let t = Test::new();
    let vault = MockVault::with_credentials(LONG_ACCESS_KEY, LONG_SECRET_KEY);

    let output = t.exec(&vault, &["sh", "-c", "printf '%s' \"$AWS_SECRET_ACCESS_KEY\""]);
    assert_success(&output);
    assert_eq!(stdout(&output), LONG_SECRET_KEY);
}

#[cfg(unix)]
#[test]
fn test_exec_passes_exit_code_through() {
    let t = Test::new();
    let vault = MockVault::standard();

    let output = t.exec(&vault, &["sh", "-c", "echo nope >&2; exit 7"]);
    assert_exit_code(&output, 7);
    assert_stderr_contains(&output, "nope");
}

#[cfg(unix)]
#[test]
fn test_exec_passes_child_flags() {
    let t = Test::new();
    let vault = MockVault::standard();

    let output = t.exec(&vault, &["sh", "-c", "echo \"$0 $1\"", "--flag", "-x"]);
    assert_success(&output);
    assert_stdout_contains(&output, "--flag -x");
}

#[test]
fn test_exec_without_command_fails() {
    let t = Test::new();
    let vault = MockVault::standard();

    let output = t.exec(&vault, &[]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "no command specified");
    assert_eq!(vault.logins(), 0);
}

#[test]
fn test_exec_missing_program() {
    let t = Test::new();
    let vault = MockVault::standard();

    let output = t.exec(&vault, &["vaultform-no-such-program"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "failed to start");
}

#[test]
fn test_exec_does_not_run_after_failed_fetch() {
    let t = Test::new();
    let vault = MockVault::start();
    vault.mount_login(ROLE_ID, SECRET_ID, TOKEN);

    let marker = t.path().join("ran");
    let output = t.exec(&vault, &["touch", marker.to_str().unwrap()]);

    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found");
    assert!(!marker.exists());
}
