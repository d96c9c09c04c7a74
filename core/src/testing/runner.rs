use std::{
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::Duration,
};

use anyhow::{bail, Context as _};
use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    process::Command,
};

use crate::cancel::CancelToken;

/// How one execution ended, short of launch/I-O errors (those are `Err`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecStatus {
    /// Exit status zero; carries stdout and stderr merged into one buffer
    /// (stdout first).
    Completed(Vec<u8>),
    /// Killed after exceeding the time limit. Partial output is discarded.
    TimedOut,
    /// Killed (or never started) because the run was cancelled.
    Cancelled,
}

/// Runs the executable under test once per call, feeding a testcase input
/// to its stdin and capturing its output under a per-case deadline.
#[derive(Debug, Clone)]
pub struct CaseRunner {
    executable: PathBuf,
    time_limit: Duration,
}

impl CaseRunner {
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(1000);

    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            time_limit: Self::DEFAULT_TIME_LIMIT,
        }
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn get_executable(&self) -> &Path {
        &self.executable
    }

    pub fn get_time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Run the executable with `input` on stdin.
    ///
    /// The subprocess is killed and reaped on timeout and on cancellation;
    /// cancellation wins when both are ready at once, so a deliberate abort
    /// is never reported as a timing property of this one case.
    pub async fn execute(&self, input: &[u8], cancel: &CancelToken) -> anyhow::Result<ExecStatus> {
        if cancel.is_cancelled() {
            return Ok(ExecStatus::Cancelled);
        }

        let mut child = Command::new(&self.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start command {:?}", self.executable))?;

        let mut stdin = child.stdin.take().context("failed to get stdin pipe")?;
        let mut stdout = child.stdout.take().context("failed to get stdout pipe")?;
        let mut stderr = child.stderr.take().context("failed to get stderr pipe")?;

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        enum Waited {
            Finished(anyhow::Result<ExitStatus>),
            DeadlineElapsed,
            CancelFired,
        }

        let waited = {
            let run = async {
                let ((), out_res, err_res) = tokio::join!(
                    async {
                        // The child may legitimately exit without draining stdin.
                        let _ = stdin.write_all(input).await;
                        drop(stdin); // the subprocess must observe end-of-input
                    },
                    stdout.read_to_end(&mut stdout_buf),
                    stderr.read_to_end(&mut stderr_buf),
                );
                out_res.context("failed to capture stdout")?;
                err_res.context("failed to capture stderr")?;
                child.wait().await.context("failed to wait for command")
            };
            tokio::pin!(run);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Waited::CancelFired,
                res = tokio::time::timeout(self.time_limit, &mut run) => match res {
                    Ok(r) => Waited::Finished(r),
                    Err(_) => Waited::DeadlineElapsed,
                },
            }
        };

        match waited {
            Waited::CancelFired => {
                child.kill().await.unwrap_or_else(|e| {
                    log::warn!("failed to kill cancelled process: {:#}", e);
                });
                Ok(ExecStatus::Cancelled)
            }
            Waited::DeadlineElapsed => {
                child.kill().await.unwrap_or_else(|e| {
                    log::warn!("failed to kill TLE process: {:#}", e);
                });
                Ok(ExecStatus::TimedOut)
            }
            Waited::Finished(res) => {
                let status = match res {
                    Ok(status) => status,
                    Err(e) => {
                        let _ = child.kill().await;
                        return Err(e);
                    }
                };
                if !status.success() {
                    bail!("command failed: {}", status);
                }
                stdout_buf.extend_from_slice(&stderr_buf);
                Ok(ExecStatus::Completed(stdout_buf))
            }
        }
    }
}
