//! The build pipeline driver.
//!
//! A run is a fixed, strictly sequential list of steps:
//! 1. Remove the previously built host editor
//! 2. Build the host editor executable
//! 3. Dump the API description, unless it already exists
//! 4. Build the target shared library
//! 5. Stage the library, API description and interface header
//! 6. Build the companion C++ bindings
//! 7. Package the mobile bundle (mobile targets only)
//!
//! The first failing step aborts the run. Nothing is retried or rolled back;
//! re-running is the recovery path, and the API dump check makes that cheap.

pub mod actions;
pub mod plan;
pub mod types;

use std::time::Instant;

use tracing::{error, info};

use crate::config::BuildConfig;
use crate::layout::DirectorySet;

use actions::stage;

pub use actions::{ProcessRunner, ToolRunner};
pub use plan::plan;
pub use types::{
  Action, ExitOutcome, Invocation, PipelineError, PipelineReport, PipelineStep, Stage, StepOutcome, StepRecord,
};

/// Execute every planned step for `config` in order.
///
/// # Returns
///
/// A report of every step and whether it ran or was skipped. On error, the
/// steps before the failing one have already taken effect.
pub async fn run<R: ToolRunner>(
  config: &BuildConfig,
  dirs: &DirectorySet,
  runner: &R,
) -> Result<PipelineReport, PipelineError> {
  let started = Instant::now();
  let steps = plan(config, dirs);

  info!(
    target_platform = %config.target_platform(),
    arch = %config.target_arch(),
    steps = steps.len(),
    "starting pipeline"
  );

  let mut report = PipelineReport::default();
  for step in &steps {
    let outcome = match execute_step(step, runner).await {
      Ok(outcome) => outcome,
      Err(e) => {
        error!(stage = %step.stage, error = %e, "pipeline aborted");
        return Err(e);
      }
    };

    report.steps.push(StepRecord {
      stage: step.stage,
      description: step.action.describe(),
      outcome,
    });
  }

  report.elapsed = started.elapsed();
  info!(elapsed_ms = report.elapsed.as_millis() as u64, "pipeline complete");
  Ok(report)
}

/// Execute a single step.
pub async fn execute_step<R: ToolRunner>(step: &PipelineStep, runner: &R) -> Result<StepOutcome, PipelineError> {
  let stage = step.stage;

  match &step.action {
    Action::RemoveIfExists { path } => {
      stage::remove_if_exists(stage, path).await?;
    }
    Action::Invoke { invocation } => {
      invoke(stage, invocation, runner).await?;
    }
    Action::Generate {
      invocation,
      output,
      force,
    } => {
      if let Some(dir) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        stage::ensure_dir(stage, dir).await?;
      }
      if !force && stage::exists(output).await {
        info!(stage = %stage, output = %output.display(), "output exists, skipping");
        return Ok(StepOutcome::Skipped);
      }
      invoke(stage, invocation, runner).await?;
    }
    Action::Copy { from, to } => {
      stage::copy_file(stage, from, to).await?;
    }
  }

  Ok(StepOutcome::Ran)
}

async fn invoke<R: ToolRunner>(stage: Stage, invocation: &Invocation, runner: &R) -> Result<(), PipelineError> {
  info!(stage = %stage, cmd = %invocation, "running");

  let status = runner
    .run(stage, invocation)
    .await
    .map_err(|source| PipelineError::Unknown {
      stage,
      message: format!("could not start {}", invocation.program.display()),
      source,
    })?;

  if !status.success() {
    return Err(PipelineError::ExternalToolFailure {
      stage,
      command: invocation.command_line(),
      status,
    });
  }

  Ok(())
}
