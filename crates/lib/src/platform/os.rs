use std::fmt;

use serde::Serialize;

use crate::config::TargetPlatform;

/// Host operating systems the driver can run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    Self::from_name(std::env::consts::OS)
  }

  /// Parse an OS identifier as reported by `std::env::consts::OS`
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "macos",
      Self::Windows => "windows",
    }
  }

  /// The build tool's platform name for an editor built on this OS.
  pub const fn build_platform(&self) -> TargetPlatform {
    match self {
      Self::Linux => TargetPlatform::LinuxBsd,
      Self::MacOs => TargetPlatform::MacOs,
      Self::Windows => TargetPlatform::Windows,
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
