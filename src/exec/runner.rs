//! Child process execution under a deadline.

use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::process::{Child, Command};

use crate::exec::capture::CombinedOutput;

/// `PATH` given to every child when none is configured.
pub const DEFAULT_PATH: &str = "/usr/sbin:/usr/bin:/sbin:/bin";

/// Appended to captured output when a command hits its deadline.
pub const TIMEOUT_MARKER: &[u8] = b"\n(timeout)\n";

/// Reasons a command did not complete successfully.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty command")]
    EmptyArgv,

    #[error("failed to start {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for command: {0}")]
    Wait(#[source] std::io::Error),

    #[error("command exited with {status}")]
    Failed { status: ExitStatus, output: Vec<u8> },

    #[error("command timed out after {limit:?}")]
    TimedOut { limit: Duration, output: Vec<u8> },
}

impl ExecError {
    /// Response body for this failure: captured output, plus the timeout
    /// marker on deadline expiry, or the error message when nothing ran.
    pub fn into_body(self) -> Vec<u8> {
        match self {
            ExecError::Failed { output, .. } => output,
            ExecError::TimedOut { mut output, .. } => {
                output.extend_from_slice(TIMEOUT_MARKER);
                output
            }
            other => format!("{}\n", other).into_bytes(),
        }
    }

    /// Short label used in metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ExecError::Failed { .. } => "failure",
            ExecError::TimedOut { .. } => "timeout",
            ExecError::EmptyArgv | ExecError::Spawn { .. } | ExecError::Wait(_) => "spawn_error",
        }
    }
}

/// Runs expanded argument vectors as child processes.
#[derive(Debug, Clone)]
pub struct Executor {
    path: String,
}

impl Executor {
    /// Create an executor whose children see only `PATH=<path>`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The `PATH` value given to children.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run `argv` (argv[0] is the executable) and return its combined output.
    ///
    /// The child's environment is cleared except for `PATH`, stdin is null,
    /// and it runs in its own process group. The whole group is killed if the
    /// child outlives `limit`; the child alone is killed if the returned
    /// future is dropped.
    ///
    /// Only the child's own exit is held to `limit`. Once it has exited, the
    /// pipes are drained for whatever is left of the deadline; descendants
    /// still holding them open then lose their readers, and the result is
    /// decided by the exit status alone.
    pub async fn run(&self, argv: &[String], limit: Duration) -> Result<Vec<u8>, ExecError> {
        let (program, args) = argv.split_first().ok_or(ExecError::EmptyArgv)?;
        let start = Instant::now();

        let mut command = Command::new(program);
        command
            .args(args)
            .env_clear()
            .env("PATH", &self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn().map_err(|source| ExecError::Spawn {
            program: program.clone(),
            source,
        })?;

        tracing::debug!(program = %program, pid = ?child.id(), timeout = ?limit, "Command started");

        let output = CombinedOutput::default();
        let readers: Vec<_> = [
            child.stdout.take().map(|stdout| output.pump(stdout)),
            child.stderr.take().map(|stderr| output.pump(stderr)),
        ]
        .into_iter()
        .flatten()
        .collect();
        let abort_readers = {
            let handles: Vec<_> = readers.iter().map(|reader| reader.abort_handle()).collect();
            move || handles.iter().for_each(|handle| handle.abort())
        };

        let status = match tokio::time::timeout(limit, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                tracing::error!(program = %program, error = %e, "Failed to wait for command");
                abort_readers();
                return Err(ExecError::Wait(e));
            }
            Err(_) => {
                tracing::warn!(program = %program, timeout = ?limit, "Command timed out, killing");
                kill_process_group(&child);
                if let Err(e) = child.start_kill() {
                    tracing::debug!(program = %program, error = %e, "Kill failed");
                }
                let _ = child.wait().await;
                abort_readers();
                return Err(ExecError::TimedOut {
                    limit,
                    output: output.snapshot(),
                });
            }
        };

        let remaining = limit.saturating_sub(start.elapsed());
        let drained = tokio::time::timeout(remaining, async {
            for reader in readers {
                let _ = reader.await;
            }
        })
        .await;
        if drained.is_err() {
            tracing::debug!(program = %program, "Output still held open after exit, no longer reading");
            abort_readers();
        }

        let elapsed = start.elapsed();
        if status.success() {
            tracing::info!(program = %program, status = %status, elapsed = ?elapsed, "Command finished");
            Ok(output.snapshot())
        } else {
            tracing::info!(program = %program, status = %status, elapsed = ?elapsed, "Command failed");
            Err(ExecError::Failed {
                status,
                output: output.snapshot(),
            })
        }
    }
}

/// Kill every process in the child's group.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    if let Some(pid) = child.id() {
        // SAFETY: kill(2) only takes plain integers; the group id is the
        // child's pid because it was spawned with `process_group(0)`.
        let rc = unsafe { libc::kill(-(pid as libc::pid_t), libc::SIGKILL) };
        if rc != 0 {
            tracing::debug!(pgid = pid, error = %std::io::Error::last_os_error(), "Process group kill failed");
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

impl Default for Executor {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}
