//! Quick status overview command.

use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::domain::Environment;
use crate::core::provisioner::Provisioner;
use crate::error::Result;

/// Show resolved configuration and readiness checks.
pub fn execute(path: Option<&Path>) -> Result<()> {
    let config = Config::load(path)?;
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    output::section("Vaultform Status");

    let file_status = if config_path.exists() {
        output::path(config_path.display())
    } else {
        format!("{} (using defaults)", output::skip("not found"))
    };
    output::kv("config", file_status);

    // Vault
    let settings = config.resolve_vault();
    match &settings {
        Ok(settings) => {
            output::kv("address", &settings.address);
            output::kv("secret path", &settings.secret_path);
            if !settings.secret_path.is_versioned() {
                output::warn("secret path has no data/ segment; KV v2 reads use <mount>/data/<path>");
            }
            output::kv("auth mount", &settings.auth_mount);
            if let Some(namespace) = &settings.namespace {
                output::kv("namespace", namespace);
            }
        }
        Err(e) => output::kv("vault", output::fail(&e.to_string())),
    }

    let identity_ready = [constants::ROLE_ID_ENV, constants::SECRET_ID_ENV]
        .iter()
        .all(|name| is_set(name));
    for name in [constants::ROLE_ID_ENV, constants::SECRET_ID_ENV] {
        let state = if is_set(name) {
            output::ok("set")
        } else {
            output::fail("not set")
        };
        output::kv(name, state);
    }

    // Terraform
    let provisioner = Provisioner::from_config(&config.terraform);
    let binary_status = match provisioner.resolve_binary() {
        Ok(found) => format!("{} {}", output::ok("✓"), found.display()),
        Err(_) => format!("{} {} not on PATH", output::fail("✗"), provisioner.binary()),
    };
    output::kv("binary", binary_status);

    let workspace_status = match provisioner.check_workspace() {
        Ok(count) => format!(
            "{} {} ({} .tf file{})",
            output::ok("✓"),
            provisioner.working_dir().display(),
            count,
            if count == 1 { "" } else { "s" }
        ),
        Err(e) => format!("{} {}", output::fail("✗"), e),
    };
    output::kv("working dir", workspace_status);

    for environment in Environment::ALL {
        let var_file = provisioner.var_file(environment);
        let state = if provisioner.working_dir().join(&var_file).is_file() {
            output::ok("✓")
        } else {
            output::skip("missing")
        };
        output::kv(environment.as_str(), format!("{} {}", state, var_file));
    }

    println!();
    if settings.is_err() {
        output::hint(&format!("run {}", output::cmd("vaultform init")));
    } else if !identity_ready {
        output::hint(&format!(
            "export {} and {}",
            constants::ROLE_ID_ENV,
            constants::SECRET_ID_ENV
        ));
    } else {
        output::hint(&format!(
            "check access with {}",
            output::cmd("vaultform fetch")
        ));
    }

    Ok(())
}

fn is_set(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| !v.trim().is_empty())
}
