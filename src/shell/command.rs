//! Child process execution with a wall-clock timeout.

use crate::error::{EnvCheckError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of a child process that ran to completion.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Outcome of running a child process under a timeout.
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// The process exited on its own.
    Completed(CommandResult),
    /// The timeout elapsed first; the process was killed and its output dropped.
    TimedOut {
        /// The timeout that was exceeded.
        timeout: Duration,
    },
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Wall-clock limit for the child.
    pub timeout: Duration,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Render a program and its arguments for messages and logs.
pub fn display_command(program: &Path, args: &[&str]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

/// Run `program` with `args`, capturing stdout and stderr.
///
/// Both pipes are drained on reader threads while the child is polled, so a
/// chatty child cannot block on a full pipe. When the timeout elapses the
/// child is killed and the reader threads are left to finish on their own.
pub fn run_with_timeout(
    program: &Path,
    args: &[&str],
    options: &CommandOptions,
) -> Result<ProcessOutcome> {
    let command_line = display_command(program, args);
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Spawning `{}` (timeout {:?})", command_line, options.timeout);

    let mut child = cmd.spawn().map_err(|e| {
        tracing::debug!("Failed to spawn `{}`: {}", command_line, e);
        EnvCheckError::CommandFailed {
            command: command_line.clone(),
            message: e.to_string(),
        }
    })?;

    let stdout_handle = child.stdout.take().map(spawn_reader);
    let stderr_handle = child.stderr.take().map(spawn_reader);

    let status = match wait_with_timeout(&mut child, options.timeout) {
        Ok(Some(status)) => status,
        Err(e) => {
            tracing::debug!("Lost track of `{}`: {}", command_line, e);
            stop_child(&mut child);
            return Err(e.into());
        }
        Ok(None) => {
            tracing::debug!("`{}` timed out after {:?}", command_line, options.timeout);
            stop_child(&mut child);
            return Ok(ProcessOutcome::TimedOut {
                timeout: options.timeout,
            });
        }
    };

    let stdout = join_reader(stdout_handle);
    let stderr = join_reader(stderr_handle);
    let duration = start.elapsed();

    tracing::debug!(
        "`{}` exited with {:?} in {:?}",
        command_line,
        status.code(),
        duration
    );

    if status.success() {
        Ok(ProcessOutcome::Completed(CommandResult::success(
            stdout, stderr, duration,
        )))
    } else {
        Ok(ProcessOutcome::Completed(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )))
    }
}

/// Poll the child until it exits or `timeout` elapses.
///
/// Returns `None` on timeout.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    let start = Instant::now();
    loop {
        match child.try_wait()? {
            Some(status) => return Ok(Some(status)),
            None => {
                if start.elapsed() >= timeout {
                    return Ok(None);
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    }
}

/// Kill the child and reap it so it does not linger as a zombie.
fn stop_child(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).to_string()
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
