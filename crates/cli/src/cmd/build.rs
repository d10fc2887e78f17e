//! Implementation of the `gdbuild build` command.
//!
//! Probes the host, resolves the project layout and runs the build pipeline:
//! host editor, API dump, target library, staging, bindings and (for mobile
//! targets) packaging.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use gdbuild_lib::config::{BuildConfig, BuildOptions, TargetPlatform};
use gdbuild_lib::layout::DirectorySet;
use gdbuild_lib::pipeline::{self, ProcessRunner, StepOutcome};
use gdbuild_lib::platform::{HostSnapshot, env};

use super::resolve_root;
use crate::output::{self, OutputFormat, symbols};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Target platform for compilation: linuxbsd, windows, macos or ios
  #[arg(long)]
  pub target: TargetPlatform,

  /// Build with debug symbols
  #[arg(long)]
  pub debug: bool,

  /// Force regeneration of the API description file
  #[arg(long)]
  pub regenerate: bool,

  /// Parallel jobs for the build tool (default: $GDBUILD_JOBS or the host CPU count)
  #[arg(short = 'j', long)]
  pub jobs: Option<NonZeroUsize>,

  /// Base directory containing the sibling projects (default: $GDBUILD_ROOT or the directory holding gdbuild)
  #[arg(long)]
  pub root: Option<PathBuf>,

  /// Print the planned steps without running anything
  #[arg(long)]
  pub dry_run: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t)]
  pub output: OutputFormat,
}

/// Execute the build command.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
  let host = HostSnapshot::probe().context("Failed to probe host platform")?;
  let root = resolve_root(args.root)?;
  let dirs = DirectorySet::resolve(&root);

  let jobs = match args.jobs {
    Some(jobs) => Some(jobs),
    None => env::jobs()?,
  };

  let options = BuildOptions {
    target: args.target,
    debug: args.debug,
    regenerate: args.regenerate,
    jobs,
    build_tool: Some(env::build_tool()),
  };
  let config = BuildConfig::new(options, &host);

  info!(host = %host, target = %config.target_platform(), root = %root.display(), "resolved configuration");

  if args.dry_run {
    let steps = pipeline::plan(&config, &dirs);
    if args.output.is_json() {
      return output::print_json(&steps);
    }

    output::print_info(&format!(
      "Plan for {} ({} steps)",
      config.build_suffix(),
      steps.len()
    ));
    for step in &steps {
      output::print_step(symbols::ARROW, step.stage.as_str(), &step.action.describe());
    }
    return Ok(());
  }

  // One child process at a time; a current-thread runtime is all the pipeline needs.
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let report = rt
    .block_on(pipeline::run(&config, &dirs, &ProcessRunner))
    .context("Build failed")?;

  if args.output.is_json() {
    return output::print_json(&report);
  }

  println!();
  for record in &report.steps {
    let symbol = match record.outcome {
      StepOutcome::Ran => symbols::SUCCESS,
      StepOutcome::Skipped => symbols::SKIP,
    };
    output::print_step(symbol, record.stage.as_str(), &record.description);
  }
  for record in report.skipped() {
    output::print_warning(&format!("Skipped {}: {}", record.stage, record.description));
  }
  output::print_success(&format!(
    "Build completed successfully in {}",
    output::format_elapsed(report.elapsed)
  ));

  Ok(())
}
