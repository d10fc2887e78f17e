mod build;
mod codegen;
mod info;

use std::path::PathBuf;

use anyhow::{Context, Result};

use gdbuild_lib::platform::env;

pub use build::{BuildArgs, cmd_build};
pub use codegen::{CodegenCommands, cmd_codegen};
pub use info::cmd_info;

/// Base directory from `--root`, falling back to `$GDBUILD_ROOT` or the executable's directory.
fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
  match root {
    Some(dir) => dunce::canonicalize(&dir).with_context(|| format!("Root directory not found: {}", dir.display())),
    None => env::root_dir().context("Failed to resolve root directory"),
  }
}
