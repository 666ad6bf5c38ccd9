//! Scoped command execution.
//!
//! Runs one external command with a credential bundle bound into its
//! environment. The bindings live in an [`EnvOverlay`] guard that is applied to
//! the child only and wiped when the guard drops, on every exit path. The
//! parent process environment is never touched.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Mutex;
use std::thread;

use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::domain::CredentialBundle;
use crate::error::{ExecError, Result};

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// Build from an argv-style slice (program first).
    ///
    /// # Errors
    ///
    /// Returns `ExecError::EmptyCommand` if the slice is empty.
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv.split_first().ok_or(ExecError::EmptyCommand)?;
        Ok(Self::new(program.as_str()).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add a non-secret environment binding.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

impl std::fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    /// Stdout and stderr, combined in arrival order
    pub output: String,
}

/// Credential bindings for exactly one child process.
///
/// Values are wiped when the overlay drops.
pub struct EnvOverlay {
    bindings: Vec<(&'static str, Zeroizing<String>)>,
}

impl EnvOverlay {
    /// Bind a bundle to the fixed access/secret key variable names.
    pub fn bind(bundle: CredentialBundle) -> Self {
        let (access_key, secret_key) = bundle.into_parts();
        Self {
            bindings: vec![
                (constants::ACCESS_KEY_ENV, access_key),
                (constants::SECRET_KEY_ENV, secret_key),
            ],
        }
    }

    /// Overlay with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Names this overlay binds.
    pub fn names(&self) -> Vec<&'static str> {
        self.bindings.iter().map(|(name, _)| *name).collect()
    }

    fn apply(&self, cmd: &mut Command) {
        for (name, value) in &self.bindings {
            cmd.env(name, value.as_str());
        }
    }
}

impl Drop for EnvOverlay {
    fn drop(&mut self) {
        if !self.bindings.is_empty() {
            trace!(bindings = self.bindings.len(), "releasing env overlay");
        }
        self.bindings.clear();
    }
}

impl std::fmt::Debug for EnvOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvOverlay")
            .field("names", &self.names())
            .finish()
    }
}

/// Runs external commands, optionally inside a credential scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedExecutor {
    echo: bool,
}

impl ScopedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the child's stdout/stderr live while capturing it.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Run `command` with `bundle` bound into its environment.
    ///
    /// The bundle is consumed; its values are wiped before this returns.
    ///
    /// # Errors
    ///
    /// Returns `ExecError::CommandFailed` carrying the exit code and output if
    /// the command exits non-zero, `ExecError::Spawn` if it cannot start.
    pub fn run_scoped(
        &self,
        bundle: CredentialBundle,
        command: &ExternalCommand,
    ) -> Result<ExecutionResult> {
        let overlay = EnvOverlay::bind(bundle);
        self.run_with(&overlay, command)
    }

    /// Run `command` without credentials.
    pub fn run(&self, command: &ExternalCommand) -> Result<ExecutionResult> {
        self.run_with(&EnvOverlay::empty(), command)
    }

    fn run_with(&self, overlay: &EnvOverlay, command: &ExternalCommand) -> Result<ExecutionResult> {
        if command.program.trim().is_empty() {
            return Err(ExecError::EmptyCommand.into());
        }

        debug!(command = %command, bound = ?overlay.names(), "running command");

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }
        cmd.envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        overlay.apply(&mut cmd);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let buffer = Mutex::new(Vec::new());
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        thread::scope(|s| {
            if let Some(pipe) = stdout {
                s.spawn(|| pump(pipe, &buffer, self.echo.then(io::stdout)));
            }
            if let Some(pipe) = stderr {
                s.spawn(|| pump(pipe, &buffer, self.echo.then(io::stderr)));
            }
        });

        let status = child.wait()?;
        let exit_code = status_code(status);
        let output = buffer.into_inner().unwrap_or_else(|e| e.into_inner());
        let output = String::from_utf8_lossy(&output).into_owned();

        debug!(program = %command.program, exit_code, "command finished");

        if exit_code != 0 {
            return Err(ExecError::CommandFailed {
                program: command.program.clone(),
                exit_code,
                output,
            }
            .into());
        }

        Ok(ExecutionResult { exit_code, output })
    }
}

/// Copy a pipe into the shared buffer until EOF, mirroring to `echo` if set.
fn pump<R: Read, W: Write>(mut pipe: R, buffer: &Mutex<Vec<u8>>, mut echo: Option<W>) {
    let mut chunk = [0u8; 8192];
    loop {
        let n = match pipe.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "failed to read child output");
                break;
            }
        };

        buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(&chunk[..n]);

        if let Some(out) = echo.as_mut() {
            let _ = out.write_all(&chunk[..n]);
            let _ = out.flush();
        }
    }
}

/// Exit code of a finished child; signal deaths map to 128 + signal on Unix.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
