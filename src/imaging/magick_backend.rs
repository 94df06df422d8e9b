//! Shell executor for composed ImageMagick pipelines.
//!
//! The pipeline string is handed to the platform shell (`sh -c` on unix,
//! `cmd /C` on Windows) so geometry quoting works exactly as rendered.
//! The process runs on a single-threaded tokio runtime so the wait can be
//! bounded with [`tokio::time::timeout`]; past the deadline the child is
//! killed and the call fails with [`ExecutionError::TimedOut`]. On unix the
//! shell leads its own process group and the whole group is killed, so
//! anything the shell forked dies with it.
//!
//! Success requires a zero exit code *and* empty stderr: ImageMagick reports
//! many problems as warnings while still exiting 0. Any byte on stderr counts,
//! whitespace included.
//!
//! Files written before a failure are left in place.

use super::backend::{ExecutionError, PipelineExecutor};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Runs pipelines through the platform shell.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineExecutor for ShellExecutor {
    fn execute(&self, pipeline: &str, timeout: Duration) -> Result<(), ExecutionError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_with_timeout(pipeline, timeout))
    }
}

fn shell_command(pipeline: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(pipeline);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(pipeline);
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }
}

/// Kill the shell and, on unix, every process in its group.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            warn!(pid, error = %e, "failed to kill pipeline process group");
        }
    }
    if let Err(e) = child.kill().await {
        warn!(error = %e, "failed to kill timed-out pipeline");
    }
}

async fn run_with_timeout(pipeline: &str, timeout: Duration) -> Result<(), ExecutionError> {
    debug!(%pipeline, timeout_ms = timeout.as_millis() as u64, "spawning pipeline");
    let start = Instant::now();

    let mut child = shell_command(pipeline)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("stderr was not captured"))?;

    let finished = tokio::time::timeout(timeout, async {
        let mut diagnostic = String::new();
        let (read, status) = tokio::join!(stderr.read_to_string(&mut diagnostic), child.wait());
        read?;
        Ok::<_, std::io::Error>((status?, diagnostic))
    })
    .await;

    let (status, diagnostic) = match finished {
        Ok(result) => result?,
        Err(_) => {
            terminate(&mut child).await;
            warn!(timeout_ms = timeout.as_millis() as u64, "pipeline timed out");
            return Err(ExecutionError::TimedOut { timeout });
        }
    };

    if !status.success() || !diagnostic.is_empty() {
        warn!(code = ?status.code(), %diagnostic, "pipeline failed");
        return Err(ExecutionError::Failed {
            code: status.code(),
            diagnostic,
        });
    }

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "pipeline finished");
    Ok(())
}
