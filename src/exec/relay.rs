// src/exec/relay.rs

//! Launch a script and relay its stdout, line by line, to a notification sink.
//!
//! Launching is synchronous: a script that cannot be started is reported to
//! the caller before any background work begins. Everything after that runs
//! on a dedicated Tokio task:
//!
//! 1. stdout is read one line at a time and every line is handed to the
//!    sink, awaiting each notification before reading the next line;
//! 2. a read error is reported and ends the relay (the process is neither
//!    read from nor waited on afterwards);
//! 3. once stdout is exhausted it is closed and the process is waited on;
//! 4. an unsuccessful exit is reported as `"<label> returned failure."`,
//!    always after the last output line.
//!
//! The relay task is the only reader of the child's stdout. stderr is
//! drained separately and only logged.

use std::fmt;
use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, Command};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::errors::{InjectorError, Result};
use crate::host::NotificationSink;

use super::invocation::CommandInvocation;

/// How a relay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// All output relayed and the process exited successfully.
    Succeeded { lines: usize },
    /// The process exited unsuccessfully. `code` is `None` if it was killed
    /// by a signal.
    Failed { lines: usize, code: Option<i32> },
    /// Reading stdout failed; the process was not waited on.
    ReadAborted { lines: usize },
    /// Waiting for the process failed.
    WaitFailed { lines: usize },
}

impl RelayOutcome {
    /// Number of output lines delivered to the sink.
    pub fn lines(&self) -> usize {
        match *self {
            RelayOutcome::Succeeded { lines }
            | RelayOutcome::Failed { lines, .. }
            | RelayOutcome::ReadAborted { lines }
            | RelayOutcome::WaitFailed { lines } => lines,
        }
    }
}

/// Handle to a running relay task.
#[derive(Debug)]
pub struct RelayHandle {
    label: String,
    handle: JoinHandle<RelayOutcome>,
}

impl RelayHandle {
    pub fn new(label: impl Into<String>, handle: JoinHandle<RelayOutcome>) -> Self {
        Self {
            label: label.into(),
            handle,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the relay to finish.
    ///
    /// Failures of the script itself are part of the [`RelayOutcome`]; an
    /// `Err` here means the relay task itself did not complete.
    pub async fn join(self) -> Result<RelayOutcome> {
        let label = self.label;
        self.handle.await.map_err(|e| {
            InjectorError::Other(
                anyhow::Error::new(e).context(format!("relay task for '{label}' did not complete")),
            )
        })
    }
}

/// Launches scripts and relays their output to a shared notification sink.
#[derive(Clone)]
pub struct ProcessOutputRelay {
    sink: Arc<dyn NotificationSink>,
}

impl fmt::Debug for ProcessOutputRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessOutputRelay").finish_non_exhaustive()
    }
}

impl ProcessOutputRelay {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Start `invocation` and relay its output in the background.
    ///
    /// Must be called from within a Tokio runtime. Returns as soon as the
    /// process is running; a process that cannot be started yields
    /// [`InjectorError::Launch`] and nothing is ever sent to the sink.
    pub fn launch(&self, invocation: &CommandInvocation) -> Result<RelayHandle> {
        info!(
            script = %invocation.label,
            command = %invocation,
            "launching script"
        );

        // Inherit environment and working directory from the caller.
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| InjectorError::Launch {
            program: invocation.program.display().to_string(),
            source,
        })?;

        let stdout = child
            .stdout
            .take()
            .with_context(|| format!("stdout of script '{}' was not captured", invocation.label))?;

        if let Some(stderr) = child.stderr.take() {
            drain_stderr(invocation.label.clone(), stderr);
        }

        let label = invocation.label.clone();
        let sink = Arc::clone(&self.sink);
        let handle = tokio::spawn(async move {
            let exit = async move { child.wait().await };
            let outcome = relay_output(&label, BufReader::new(stdout), exit, &*sink).await;
            debug!(script = %label, ?outcome, "relay finished");
            outcome
        });

        Ok(RelayHandle::new(invocation.label.clone(), handle))
    }
}

/// Relay every line of `reader` to `sink`, then await `exit` and report an
/// unsuccessful status.
///
/// `exit` is only polled once `reader` reached end-of-stream; after a read
/// error it is dropped without being polled.
pub async fn relay_output<R, W>(
    label: &str,
    mut reader: R,
    exit: W,
    sink: &dyn NotificationSink,
) -> RelayOutcome
where
    R: AsyncBufRead + Unpin,
    W: Future<Output = io::Result<ExitStatus>>,
{
    let mut lines = 0usize;
    let mut buf = Vec::new();
    let mut skip_lf = false;

    loop {
        buf.clear();
        match read_line(&mut reader, &mut buf, &mut skip_lf).await {
            Ok(false) => break,
            Ok(true) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                debug!(script = %label, "stdout: {}", line);
                lines += 1;
                sink.notify(line).await;
            }
            Err(e) => {
                error!(
                    script = %label,
                    lines,
                    error = %e,
                    "reading script output failed; aborting relay"
                );
                sink.notify(format!("Script i/o error: {e}")).await;
                return RelayOutcome::ReadAborted { lines };
            }
        }
    }

    // stdout is closed before the exit status is collected.
    drop(reader);

    match exit.await {
        Ok(status) if status.success() => {
            info!(script = %label, lines, "script finished successfully");
            RelayOutcome::Succeeded { lines }
        }
        Ok(status) => {
            let code = status.code();
            info!(script = %label, lines, exit_code = ?code, "script returned failure");
            sink.notify(format!("{label} returned failure.")).await;
            RelayOutcome::Failed { lines, code }
        }
        Err(e) => {
            error!(script = %label, error = %e, "waiting for script failed");
            sink.notify(format!("Wait problem: {e}")).await;
            RelayOutcome::WaitFailed { lines }
        }
    }
}

/// Read one line into `buf`, without its terminator.
///
/// A line ends at `\n`, `\r` or `\r\n`. `skip_lf` carries a trailing `\r`
/// over to the next call so a `\r\n` split across two buffer fills still
/// counts as a single break. Returns `Ok(false)` at end-of-stream when
/// nothing was read; a final unterminated line is still returned.
async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>, skip_lf: &mut bool) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    let mut read_any = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(read_any);
        }

        let mut start = 0;
        if *skip_lf {
            *skip_lf = false;
            if available[0] == b'\n' {
                start = 1;
            }
        }

        match available[start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            Some(i) => {
                let end = start + i;
                buf.extend_from_slice(&available[start..end]);
                *skip_lf = available[end] == b'\r';
                reader.consume(end + 1);
                return Ok(true);
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(&available[start..]);
                reader.consume(len);
                read_any |= len > start;
            }
        }
    }
}

/// Always consume stderr so the child can't block on it; log at debug.
fn drain_stderr(label: String, stderr: ChildStderr) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();

        while let Ok(Some(line)) = lines.next_line().await {
            debug!(script = %label, "stderr: {}", line);
        }
    });
}
