//! Types for pipeline planning and execution.
//!
//! This module defines the steps the driver executes, the record it keeps of
//! them, and the errors that abort a run.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// The fixed stages of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
  Cleanup,
  HostEditorBuild,
  ApiDump,
  TargetLibraryBuild,
  ArtifactStaging,
  BindingsBuild,
  MobilePackaging,
}

impl Stage {
  pub fn as_str(&self) -> &'static str {
    match self {
      Stage::Cleanup => "cleanup",
      Stage::HostEditorBuild => "host editor build",
      Stage::ApiDump => "API dump",
      Stage::TargetLibraryBuild => "target library build",
      Stage::ArtifactStaging => "artifact staging",
      Stage::BindingsBuild => "bindings build",
      Stage::MobilePackaging => "mobile packaging",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// An external program to spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<String>,
  /// Working directory; the driver's own when `None`.
  pub cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  /// Shell-like rendering used in logs and error messages.
  ///
  /// Words with whitespace or `"` are double-quoted, escaping `"` and `\`.
  pub fn command_line(&self) -> String {
    let mut line = quote(&self.program.display().to_string());
    for arg in &self.args {
      line.push(' ');
      line.push_str(&quote(arg));
    }
    line
  }
}

fn quote(word: &str) -> String {
  let needs_quotes = word.is_empty() || word.contains(|c: char| c.is_whitespace() || c == '"');
  if !needs_quotes {
    return word.to_string();
  }

  let mut quoted = String::with_capacity(word.len() + 2);
  quoted.push('"');
  for c in word.chars() {
    if c == '"' || c == '\\' {
      quoted.push('\\');
    }
    quoted.push(c);
  }
  quoted.push('"');
  quoted
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.command_line())
  }
}

/// What a single step does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
  /// Delete a file; a missing file is not an error.
  RemoveIfExists { path: PathBuf },

  /// Spawn a program and require a zero exit status.
  Invoke { invocation: Invocation },

  /// Create `output`'s directory, then spawn a program expected to produce
  /// `output`, unless it already exists and `force` is off.
  Generate {
    invocation: Invocation,
    output: PathBuf,
    force: bool,
  },

  /// Copy a file. The destination directory must already exist.
  Copy { from: PathBuf, to: PathBuf },
}

impl Action {
  pub fn describe(&self) -> String {
    match self {
      Action::RemoveIfExists { path } => format!("remove {}", path.display()),
      Action::Invoke { invocation } => format!("run {}", invocation),
      Action::Generate { invocation, output, force } => {
        let when = if *force { "" } else { " (if missing)" };
        format!("generate {}{} with {}", output.display(), when, invocation)
      }
      Action::Copy { from, to } => format!("copy {} -> {}", from.display(), to.display()),
    }
  }
}

/// One ordered unit of pipeline work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStep {
  pub stage: Stage,
  #[serde(flatten)]
  pub action: Action,
}

impl PipelineStep {
  pub fn new(stage: Stage, action: Action) -> Self {
    Self { stage, action }
  }
}

/// Exit status of a spawned program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExitOutcome {
  /// Exit code, `None` when the process was terminated by a signal.
  pub code: Option<i32>,
}

impl ExitOutcome {
  pub const SUCCESS: ExitOutcome = ExitOutcome { code: Some(0) };

  pub fn from_code(code: i32) -> Self {
    Self { code: Some(code) }
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

impl From<std::process::ExitStatus> for ExitOutcome {
  fn from(status: std::process::ExitStatus) -> Self {
    Self { code: status.code() }
  }
}

impl fmt::Display for ExitOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.code {
      Some(code) => write!(f, "exit code {}", code),
      None => write!(f, "termination by signal"),
    }
  }
}

/// Whether a step did its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
  Ran,
  Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
  pub stage: Stage,
  pub description: String,
  pub outcome: StepOutcome,
}

/// Record of a successful run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
  pub steps: Vec<StepRecord>,
  pub elapsed: Duration,
}

impl PipelineReport {
  /// Stages with at least one step that ran, in execution order.
  pub fn executed_stages(&self) -> Vec<Stage> {
    let mut stages: Vec<Stage> = Vec::new();
    for record in self.steps.iter().filter(|r| r.outcome == StepOutcome::Ran) {
      if stages.last() != Some(&record.stage) {
        stages.push(record.stage);
      }
    }
    stages
  }

  pub fn skipped(&self) -> impl Iterator<Item = &StepRecord> {
    self.steps.iter().filter(|r| r.outcome == StepOutcome::Skipped)
  }
}

/// Errors that abort a pipeline run.
///
/// None of these are retried; re-running the pipeline is the recovery path.
#[derive(Debug, Error)]
pub enum PipelineError {
  /// A spawned program exited unsuccessfully.
  #[error("{stage} failed: `{command}` exited with {status}")]
  ExternalToolFailure {
    stage: Stage,
    command: String,
    status: ExitOutcome,
  },

  /// A file or directory required for staging is missing or unwritable.
  #[error("{stage} failed: {message}: {}", .path.display())]
  Staging {
    stage: Stage,
    path: PathBuf,
    message: String,
  },

  /// Anything else, such as a program that could not be spawned.
  #[error("{stage} failed unexpectedly: {message}: {source}")]
  Unknown {
    stage: Stage,
    message: String,
    #[source]
    source: std::io::Error,
  },
}

impl PipelineError {
  pub fn stage(&self) -> Stage {
    match self {
      PipelineError::ExternalToolFailure { stage, .. }
      | PipelineError::Staging { stage, .. }
      | PipelineError::Unknown { stage, .. } => *stage,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(stage: Stage, outcome: StepOutcome) -> StepRecord {
    StepRecord {
      stage,
      description: String::new(),
      outcome,
    }
  }

  #[test]
  fn command_line_quotes_spaces() {
    let invocation = Invocation::new("/opt/my tools/scons")
      .args(["platform=linuxbsd", "-j8"])
      .arg("");
    assert_eq!(invocation.command_line(), "\"/opt/my tools/scons\" platform=linuxbsd -j8 \"\"");
  }

  #[test]
  fn command_line_escapes_embedded_quotes() {
    let invocation = Invocation::new("scons").args(["define=NAME=\"a b\"", "path=C:\\tools", "say\\\"hi"]);
    assert_eq!(
      invocation.command_line(),
      r#"scons "define=NAME=\"a b\"" path=C:\tools "say\\\"hi""#
    );
  }

  #[test]
  fn executed_stages_collapses_and_drops_skips() {
    let report = PipelineReport {
      steps: vec![
        record(Stage::Cleanup, StepOutcome::Ran),
        record(Stage::ApiDump, StepOutcome::Skipped),
        record(Stage::ArtifactStaging, StepOutcome::Ran),
        record(Stage::ArtifactStaging, StepOutcome::Ran),
      ],
      elapsed: Duration::ZERO,
    };

    assert_eq!(report.executed_stages(), vec![Stage::Cleanup, Stage::ArtifactStaging]);
    assert_eq!(report.skipped().count(), 1);
  }

  #[test]
  fn tool_failure_message_names_stage_and_command() {
    let err = PipelineError::ExternalToolFailure {
      stage: Stage::HostEditorBuild,
      command: "scons platform=linuxbsd".to_string(),
      status: ExitOutcome::from_code(2),
    };
    assert_eq!(
      err.to_string(),
      "host editor build failed: `scons platform=linuxbsd` exited with exit code 2"
    );
    assert_eq!(err.stage(), Stage::HostEditorBuild);
  }

  #[test]
  fn signal_termination_is_not_success() {
    let outcome = ExitOutcome { code: None };
    assert!(!outcome.success());
    assert_eq!(outcome.to_string(), "termination by signal");
  }
}
