//! External program invocation.
//!
//! The pipeline spawns programs through the [`ToolRunner`] seam so tests can
//! substitute a recording fake. [`ProcessRunner`] is the real implementation.

use std::future::Future;
use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::pipeline::types::{ExitOutcome, Invocation, Stage};

/// Spawns external programs for the pipeline.
pub trait ToolRunner {
  /// Run `invocation` on behalf of `stage` and report its exit status.
  ///
  /// An `Err` means the program could not be started at all.
  fn run(&self, stage: Stage, invocation: &Invocation) -> impl Future<Output = io::Result<ExitOutcome>> + Send;
}

/// Runs programs as child processes.
///
/// Children inherit the driver's stdout and stderr so build tool output
/// streams straight to the terminal. There is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
  async fn run(&self, stage: Stage, invocation: &Invocation) -> io::Result<ExitOutcome> {
    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .stdin(Stdio::null())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .kill_on_drop(true);

    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    debug!(stage = %stage, cmd = %invocation, cwd = ?invocation.cwd, "spawning process");

    let status = command.status().await?;
    Ok(status.into())
  }
}
