//! Tests for `vaultform pipeline` command.

use crate::support::*;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_dry_run_needs_no_credentials() {
    let t = Test::with_workspace();

    t.cmd()
        .args(["pipeline", "--action", "apply", "--env", "prod", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("approval"))
        .stdout(predicate::str::contains(
            "terraform apply -input=false -auto-approve tfplan",
        ));
}

#[test]
fn test_dry_run_json_lists_steps() {
    let t = Test::with_workspace();

    let output = t
        .cmd()
        .args([
            "pipeline", "--action", "destroy", "--env", "dev", "--dry-run", "--json",
        ])
        .output()
        .unwrap();
    assert_success(&output);

    let steps: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let names: Vec<&str> = steps
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["step"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "checkout",
            "tool_setup",
            "init",
            "select_workspace",
            "format_check",
            "validate",
            "plan",
            "destroy"
        ]
    );
    assert_eq!(steps[7]["credentials"], true);
    assert!(steps[0].get("command").is_none());
}

#[test]
fn test_invalid_environment_rejected() {
    let t = Test::new();

    t.cmd()
        .args(["pipeline", "--action", "plan", "--env", "qa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use crate::support::terraform::FakeTerraform;

    fn setup(fail_on: &str, code: i32) -> (Test, MockVault, FakeTerraform) {
        let t = Test::with_workspace();
        let vault = MockVault::standard();
        let tf = FakeTerraform::install_failing(t.path(), fail_on, code);
        t.write(".vaultform.toml", &tf.config(&vault.uri()));
        (t, vault, tf)
    }

    #[test]
    fn test_plan_runs_and_mirrors_output() {
        let (t, vault, tf) = setup("", 0);

        let output = t.pipeline(&vault, &["--action", "plan", "--env", "dev"]);
        assert_success(&output);
        assert_stdout_contains(&output, "terraform plan ok");
        assert_stdout_contains(&output, "7 steps passed");
        assert_eq!(tf.subcommands().len(), 6);
        // init, workspace select and plan each fetch their own credentials
        assert_eq!(vault.logins(), 3);
        assert_eq!(vault.reads(), 3);
    }

    #[test]
    fn test_production_apply_without_terminal_fails() {
        let (t, vault, tf) = setup("", 0);

        let output = t.pipeline(&vault, &["--action", "apply", "--env", "prod"]);
        assert_exit_code(&output, 1);
        assert_stderr_contains(&output, "--confirm prod");
        assert!(!tf.subcommands().contains(&"apply".to_string()));
    }

    #[test]
    fn test_production_apply_confirmed() {
        let (t, vault, tf) = setup("", 0);

        let output = t.pipeline(
            &vault,
            &["--action", "apply", "--env", "prod", "--confirm", "prod"],
        );
        assert_success(&output);
        assert_stdout_contains(&output, "approved by");
        assert_eq!(
            tf.subcommands().last().map(String::as_str),
            Some("output")
        );
    }

    #[test]
    fn test_confirmation_for_other_environment_is_denied() {
        let (t, vault, tf) = setup("", 0);

        let output = t.pipeline(
            &vault,
            &["--action", "destroy", "--env", "prod", "--confirm", "staging"],
        );
        assert_exit_code(&output, 1);
        assert_stderr_contains(&output, "approval denied");
        assert!(!tf.subcommands().contains(&"destroy".to_string()));
    }

    #[test]
    fn test_failed_step_exit_code_and_json_report() {
        let (t, vault, _tf) = setup("validate", 3);

        let output = t.pipeline(&vault, &["--action", "plan", "--env", "dev", "--json"]);
        assert_exit_code(&output, 3);
        assert_stderr_contains(&output, "validate step failed");

        let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["target"]["action"], "plan");
        assert_eq!(report["failure"]["step"], "validate");
        assert_eq!(report["failure"]["exit_code"], 3);
        let plan = report["steps"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["step"] == "plan")
            .unwrap();
        assert_eq!(plan["status"], "not_run");
    }

    #[test]
    fn test_report_never_contains_secret_key() {
        let t = Test::with_workspace();
        let vault = MockVault::with_credentials(LONG_ACCESS_KEY, LONG_SECRET_KEY);
        let tf = FakeTerraform::install(t.path());
        t.write(".vaultform.toml", &tf.config(&vault.uri()));

        let output = t.pipeline(&vault, &["--action", "plan", "--env", "dev", "--json"]);
        assert_success(&output);
        assert_stdout_excludes(&output, LONG_SECRET_KEY);
        assert_stderr_excludes(&output, LONG_SECRET_KEY);
    }

    #[test]
    fn test_gated_json_stdout_is_only_the_report() {
        let (t, vault, _tf) = setup("", 0);

        let denied = t.pipeline(&vault, &["--action", "apply", "--env", "prod", "--json"]);
        assert_exit_code(&denied, 1);
        let report: Value = serde_json::from_str(&stdout(&denied)).unwrap();
        assert_eq!(report["failure"]["step"], "approval");

        let approved = t.pipeline(
            &vault,
            &["--action", "apply", "--env", "prod", "--json", "--confirm", "prod"],
        );
        assert_success(&approved);
        let report: Value = serde_json::from_str(&stdout(&approved)).unwrap();
        assert!(report["approved_by"].is_string());
        assert!(report.get("failure").is_none());
    }
}
