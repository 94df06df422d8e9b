//! Pipeline execution trait and shared error type.
//!
//! The composer never runs anything itself. It hands the rendered command to
//! a [`PipelineExecutor`], which runs it under a hard timeout and reports
//! success, failure with diagnostic text, or a timeout.
//!
//! The production implementation is
//! [`ShellExecutor`](super::magick_backend::ShellExecutor), which runs the
//! command through the platform shell. Tests use a recording mock.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to start pipeline: {0}")]
    Spawn(#[from] std::io::Error),
    /// Non-zero exit, or diagnostic text on stderr regardless of exit code.
    #[error("pipeline failed (exit code {code:?}): {diagnostic}")]
    Failed {
        code: Option<i32>,
        diagnostic: String,
    },
    #[error("pipeline did not finish within {}ms", timeout.as_millis())]
    TimedOut { timeout: Duration },
}

/// Runs a composed pipeline.
///
/// Implementations must block until the command exits or `timeout` elapses,
/// kill the command on timeout, and treat any non-empty stderr output as a
/// failure even when the exit code is zero.
pub trait PipelineExecutor: Sync {
    fn execute(&self, pipeline: &str, timeout: Duration) -> Result<(), ExecutionError>;
}
