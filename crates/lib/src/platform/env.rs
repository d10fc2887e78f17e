//! Environment variable overrides.
//!
//! Command-line flags take precedence; these are consulted only when the
//! corresponding flag is absent.

use std::env;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::consts::{BUILD_TOOL, ENV_BUILD_TOOL, ENV_JOBS, ENV_ROOT};
use crate::platform::PlatformError;

/// Returns the base directory the sibling projects are resolved against.
///
/// `GDBUILD_ROOT` if set, otherwise the directory holding the `gdbuild`
/// executable. The result is canonicalized, so the directory must exist.
pub fn root_dir() -> Result<PathBuf, PlatformError> {
  match env::var_os(ENV_ROOT) {
    Some(value) if !value.is_empty() => {
      let dir = PathBuf::from(value);
      dunce::canonicalize(&dir).map_err(|source| PlatformError::Resolve {
        path: dir.display().to_string(),
        source,
      })
    }
    _ => driver_dir(),
  }
}

/// Directory containing the running executable, with symlinks resolved.
pub fn driver_dir() -> Result<PathBuf, PlatformError> {
  let resolve_err = |path: String, source: io::Error| PlatformError::Resolve { path, source };

  let exe = env::current_exe().map_err(|e| resolve_err("current executable".to_string(), e))?;
  let exe = dunce::canonicalize(&exe).map_err(|e| resolve_err(exe.display().to_string(), e))?;

  exe.parent().map(PathBuf::from).ok_or_else(|| {
    resolve_err(
      exe.display().to_string(),
      io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"),
    )
  })
}

/// Returns the job count from `GDBUILD_JOBS`, if set.
pub fn jobs() -> Result<Option<NonZeroUsize>, PlatformError> {
  let Ok(value) = env::var(ENV_JOBS) else {
    return Ok(None);
  };

  value
    .trim()
    .parse::<NonZeroUsize>()
    .map(Some)
    .map_err(|e| PlatformError::InvalidEnv {
      var: ENV_JOBS,
      value,
      reason: e.to_string(),
    })
}

/// Returns the build tool program: `GDBUILD_SCONS` or `scons` from `PATH`.
pub fn build_tool() -> PathBuf {
  env::var_os(ENV_BUILD_TOOL)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(BUILD_TOOL))
}
