//! Subprocess execution with captured outcome.
//!
//! Registered command aliases resolve to a program line that is spawned
//! with piped stdio and `kill_on_drop(true)`. Exit status and both output
//! streams are captured and returned to the dispatcher; nothing runs
//! fire-and-forget.

use std::process::Stdio;

use serde::Serialize;
use tokio::process::Command;
use tracing::info;

use crate::{AppError, Result};

/// Captured result of one subprocess run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Process exit code; `None` when terminated by a signal.
    pub status: Option<i32>,
    /// Captured standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Captured standard error, lossily decoded as UTF-8.
    pub stderr: String,
}

impl CommandOutcome {
    /// Whether the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Run a configured program line to completion and capture its outcome.
///
/// The line is split on whitespace: first token is the program, the rest
/// are arguments. Quoting is not interpreted; aliases needing shell
/// features should name the shell explicitly in their program line.
///
/// # Errors
///
/// Returns `AppError::Exec` if the line is empty or the process fails to
/// spawn or be awaited.
pub async fn run_command(program_line: &str) -> Result<CommandOutcome> {
    let mut tokens = program_line.split_whitespace();
    let program = tokens
        .next()
        .ok_or_else(|| AppError::Exec("empty program line".into()))?;

    let mut cmd = Command::new(program);
    cmd.args(tokens)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = cmd
        .output()
        .await
        .map_err(|err| AppError::Exec(format!("failed to spawn '{program}': {err}")))?;

    let outcome = CommandOutcome {
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    info!(
        program,
        status = ?outcome.status,
        stdout_bytes = outcome.stdout.len(),
        stderr_bytes = outcome.stderr.len(),
        "command completed"
    );

    Ok(outcome)
}
