//! Host environment probe.
//!
//! Everything the pipeline needs to know about the machine it runs on is read
//! once here and frozen into a [`HostSnapshot`]. The rest of the crate only
//! consumes the snapshot, so tests can hand it a fake host.

pub mod arch;
pub mod env;
pub mod os;

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TargetPlatform;
use crate::consts::FALLBACK_CPUS;

pub use arch::Arch;
pub use os::Os;

/// Errors that can occur while probing the host
#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("unsupported host operating system: {0}")]
  UnsupportedOs(String),

  #[error("invalid value for {var}: {value:?} ({reason})")]
  InvalidEnv {
    var: &'static str,
    value: String,
    reason: String,
  },

  #[error("failed to resolve directory {path}: {source}")]
  Resolve {
    path: String,
    #[source]
    source: std::io::Error,
  },
}

/// Immutable snapshot of the host the driver runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostSnapshot {
  pub os: Os,
  pub arch: Arch,
  pub cpus: NonZeroUsize,
}

impl HostSnapshot {
  pub fn new(os: Os, arch: Arch, cpus: NonZeroUsize) -> Self {
    Self { os, arch, cpus }
  }

  /// Read OS, architecture and CPU count from the running system.
  ///
  /// An unknown architecture falls back to `x86_64`; an unreadable CPU count
  /// falls back to [`FALLBACK_CPUS`].
  pub fn probe() -> Result<Self, PlatformError> {
    let os = Os::current().ok_or_else(|| PlatformError::UnsupportedOs(std::env::consts::OS.to_string()))?;

    let arch = Arch::current().unwrap_or_else(|| {
      warn!(arch = std::env::consts::ARCH, "unknown host architecture, assuming x86_64");
      Arch::X86_64
    });

    let system = System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
    let cpus = NonZeroUsize::new(system.cpus().len())
      .or_else(|| NonZeroUsize::new(FALLBACK_CPUS))
      .unwrap_or(NonZeroUsize::MIN);

    let snapshot = Self { os, arch, cpus };
    debug!(os = %snapshot.os, arch = %snapshot.arch, cpus = snapshot.cpus.get(), "probed host");
    Ok(snapshot)
  }

  /// The build tool platform an editor for this host is built with.
  pub fn build_platform(&self) -> TargetPlatform {
    self.os.build_platform()
  }
}

impl fmt::Display for HostSnapshot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{} ({} cpus)", self.arch, self.os, self.cpus)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn probe_detects_current_host() {
    let host = HostSnapshot::probe().unwrap();
    assert_eq!(Some(host.os), Os::current());
    assert!(host.cpus.get() >= 1);
  }

  #[test]
  fn build_platform_follows_os() {
    let cpus = NonZeroUsize::new(8).unwrap();
    let host = HostSnapshot::new(Os::Windows, Arch::X86_64, cpus);
    assert_eq!(host.build_platform(), TargetPlatform::Windows);
    assert_eq!(host.to_string(), "x86_64-windows (8 cpus)");
  }
}
