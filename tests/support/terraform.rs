//! Fake Terraform binary.
//!
//! A shell script that records each invocation (arguments, bound access key
//! and automation flag) to a log file, and fails on a chosen subcommand.

use std::path::{Path, PathBuf};

pub struct FakeTerraform {
    pub binary: PathBuf,
    pub log: PathBuf,
}

impl FakeTerraform {
    /// Install a script in `dir` that succeeds for every subcommand.
    pub fn install(dir: &Path) -> Self {
        Self::install_failing(dir, "", 0)
    }

    /// Install a script that exits with `code` when run as `terraform <fail_on>`.
    pub fn install_failing(dir: &Path, fail_on: &str, code: i32) -> Self {
        let bin_dir = dir.join("bin");
        std::fs::create_dir_all(&bin_dir).expect("failed to create bin dir");
        let binary = bin_dir.join("terraform");
        let log = dir.join("terraform.log");

        let script = format!(
            r#"#!/bin/sh
echo "$* | key=${{AWS_ACCESS_KEY_ID:-unset}} automation=${{TF_IN_AUTOMATION:-0}}" >> "{log}"
if [ -n "{fail_on}" ] && [ "$1" = "{fail_on}" ]; then
  echo "Error: $1 failed" >&2
  exit {code}
fi
echo "terraform $1 ok"
exit 0
"#,
            log = log.display(),
            fail_on = fail_on,
            code = code,
        );
        std::fs::write(&binary, script).expect("failed to write fake terraform");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755))
                .expect("failed to chmod fake terraform");
        }

        Self { binary, log }
    }

    /// Logged invocations, one line each.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Logged line for the first invocation of `subcommand`.
    pub fn call(&self, subcommand: &str) -> Option<String> {
        self.calls()
            .into_iter()
            .find(|line| line.split_whitespace().next() == Some(subcommand))
    }

    /// Subcommands invoked, in order.
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|line| line.split_whitespace().next().map(str::to_string))
            .collect()
    }

    /// Config snippet pointing `[terraform]` at this binary.
    pub fn config(&self, vault_uri: &str) -> String {
        format!(
            "[vault]\naddress = \"{}\"\nsecret_path = \"{}\"\n\n[terraform]\nbinary = \"{}\"\n",
            vault_uri,
            super::SECRET_PATH,
            self.binary.display()
        )
    }
}
