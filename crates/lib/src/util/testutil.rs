//! Test utilities for gdbuild-lib.
//!
//! Cross-platform shell helpers for exercising [`ProcessRunner`], and a
//! recording [`ToolRunner`] that stands in for the real build tools.
//!
//! [`ProcessRunner`]: crate::pipeline::ProcessRunner

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::pipeline::{ExitOutcome, Invocation, Stage, ToolRunner};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// A [`ToolRunner`] that records every invocation instead of spawning it.
///
/// Successful invocations for a stage can create files, standing in for the
/// artifacts the real build tool or editor would write.
#[derive(Default)]
pub struct RecordingRunner {
  calls: Mutex<Vec<(Stage, Invocation)>>,
  fail_at: Option<Stage>,
  unlaunchable: bool,
  creates: Vec<(Stage, PathBuf)>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Exit with code 1 for invocations of `stage`.
  pub fn failing_at(mut self, stage: Stage) -> Self {
    self.fail_at = Some(stage);
    self
  }

  /// Fail every invocation as if the program did not exist.
  pub fn unlaunchable(mut self) -> Self {
    self.unlaunchable = true;
    self
  }

  /// Write `path` when an invocation of `stage` succeeds.
  pub fn creating(mut self, stage: Stage, path: PathBuf) -> Self {
    self.creates.push((stage, path));
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().iter().map(|(_, inv)| inv.clone()).collect()
  }

  pub fn stages(&self) -> Vec<Stage> {
    self.calls.lock().unwrap().iter().map(|(stage, _)| *stage).collect()
  }
}

impl ToolRunner for RecordingRunner {
  async fn run(&self, stage: Stage, invocation: &Invocation) -> io::Result<ExitOutcome> {
    self.calls.lock().unwrap().push((stage, invocation.clone()));

    if self.unlaunchable {
      return Err(io::Error::new(io::ErrorKind::NotFound, "program not found"));
    }
    if self.fail_at == Some(stage) {
      return Ok(ExitOutcome::from_code(1));
    }

    for (_, path) in self.creates.iter().filter(|(s, _)| *s == stage) {
      if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::write(path, format!("produced by {}", stage))?;
    }

    Ok(ExitOutcome::SUCCESS)
  }
}
