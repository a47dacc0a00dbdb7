//! Subprocess execution for the advisory probes.
//!
//! The probes only ever shell out; the external CLI is never reimplemented.
//! The [`ProcessRunner`] trait is the narrow seam that lets tests substitute
//! a fake without spawning anything.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{Result, SetupError};

/// Defensive timeout for external CLI calls.
pub const CLI_TIMEOUT: Duration = Duration::from_secs(30);

/// Output from a CLI command.
#[derive(Debug, Clone)]
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CliOutput {
    /// Check if command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Capability to run an external process and capture its output.
pub trait ProcessRunner {
    /// Run `program` with `args`, returning captured output and exit code.
    fn run(
        &self,
        program: &str,
        args: &[&str],
    ) -> impl std::future::Future<Output = Result<CliOutput>> + Send;
}

/// Real runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CliOutput> {
        run_command(program, args, CLI_TIMEOUT).await
    }
}

/// Run a CLI command with timeout.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned, fails mid-read, or
/// exceeds the timeout. A non-zero exit is NOT an error here; callers inspect
/// `exit_code` themselves.
pub async fn run_command(
    program: &str,
    args: &[&str],
    timeout_duration: Duration,
) -> Result<CliOutput> {
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| SetupError::CommandFailed {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    let result = timeout(timeout_duration, async {
        // Read stdout and stderr concurrently to avoid deadlock.
        // If we read them sequentially and the child writes a lot to one stream,
        // its pipe buffer can fill up while we're waiting on the other stream,
        // causing the child to block and creating a deadlock.
        let stdout_handle = async {
            let mut stdout = String::new();
            if let Some(mut out) = child.stdout.take() {
                out.read_to_string(&mut stdout).await?;
            }
            Ok::<_, std::io::Error>(stdout)
        };

        let stderr_handle = async {
            let mut stderr = String::new();
            if let Some(mut err) = child.stderr.take() {
                err.read_to_string(&mut stderr).await?;
            }
            Ok::<_, std::io::Error>(stderr)
        };

        let (stdout_result, stderr_result) = tokio::join!(stdout_handle, stderr_handle);
        let stdout = stdout_result?;
        let stderr = stderr_result?;

        let status = child.wait().await?;

        Ok::<_, std::io::Error>(CliOutput {
            stdout,
            stderr,
            exit_code: status.code().unwrap_or(-1),
        })
    })
    .await;

    match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(SetupError::CommandFailed {
            program: program.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => {
            // Timeout - kill the process
            let _ = child.kill().await;
            let _ = child.wait().await;
            Err(SetupError::CommandFailed {
                program: program.to_string(),
                reason: format!("timed out after {}s", timeout_duration.as_secs()),
            })
        }
    }
}
