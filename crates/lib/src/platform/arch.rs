use std::fmt;

use serde::Serialize;

/// CPU architectures, named the way the build tool spells them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
  #[serde(rename = "x86_64")]
  X86_64,
  #[serde(rename = "x86_32")]
  X86_32,
  #[serde(rename = "arm64")]
  Arm64,
  #[serde(rename = "arm32")]
  Arm32,
  #[serde(rename = "rv64")]
  Rv64,
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Option<Self> {
    Self::from_name(std::env::consts::ARCH)
  }

  /// Parse an architecture name.
  ///
  /// Accepts both Rust's names (`aarch64`, `x86`) and the build tool's
  /// (`arm64`, `x86_32`), plus the `AMD64` spelling Windows reports.
  pub fn from_name(name: &str) -> Option<Self> {
    match name.to_ascii_lowercase().as_str() {
      "x86_64" | "amd64" => Some(Self::X86_64),
      "x86" | "x86_32" | "i386" | "i686" => Some(Self::X86_32),
      "aarch64" | "arm64" => Some(Self::Arm64),
      "arm" | "arm32" | "armv7" => Some(Self::Arm32),
      "riscv64" | "rv64" => Some(Self::Rv64),
      _ => None,
    }
  }

  /// Returns the build tool's identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86_32 => "x86_32",
      Self::Arm64 => "arm64",
      Self::Arm32 => "arm32",
      Self::Rv64 => "rv64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
