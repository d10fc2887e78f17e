//! Build configuration for a single pipeline run.
//!
//! A [`BuildConfig`] is derived once from user options and a
//! [`HostSnapshot`] and is never mutated afterwards. Derived strings such as
//! the build suffix are recomputed from the fields on every call.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::consts::BUILD_TOOL;
use crate::platform::{Arch, HostSnapshot, Os};

/// Platforms the build tool can produce a library for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
  LinuxBsd,
  Windows,
  MacOs,
  Ios,
}

impl TargetPlatform {
  pub const ALL: [TargetPlatform; 4] = [Self::LinuxBsd, Self::Windows, Self::MacOs, Self::Ios];

  /// Returns the build tool's identifier for this platform
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::LinuxBsd => "linuxbsd",
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::Ios => "ios",
    }
  }

  /// Mobile targets get a static archive and a packaged bundle.
  pub const fn is_mobile(&self) -> bool {
    matches!(self, Self::Ios)
  }
}

impl fmt::Display for TargetPlatform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown target platform {0:?} (expected one of: linuxbsd, windows, macos, ios)")]
pub struct ParseTargetError(pub String);

impl FromStr for TargetPlatform {
  type Err = ParseTargetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|platform| platform.as_str() == s)
      .ok_or_else(|| ParseTargetError(s.to_string()))
  }
}

/// Floating point precision the engine is compiled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
  Single,
  Double,
}

impl Precision {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Single => "single",
      Self::Double => "double",
    }
  }
}

impl fmt::Display for Precision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Precision every pipeline run builds with.
pub const PIPELINE_PRECISION: Precision = Precision::Double;

/// File extension of the produced engine library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LibSuffix {
  #[serde(rename = "so")]
  So,
  #[serde(rename = "dll")]
  Dll,
  #[serde(rename = "dylib")]
  Dylib,
  #[serde(rename = "a")]
  StaticArchive,
}

impl LibSuffix {
  /// Shared library extension native to `os`.
  pub const fn for_host(os: Os) -> Self {
    match os {
      Os::Linux => Self::So,
      Os::Windows => Self::Dll,
      Os::MacOs => Self::Dylib,
    }
  }

  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::So => "so",
      Self::Dll => "dll",
      Self::Dylib => "dylib",
      Self::StaticArchive => "a",
    }
  }
}

impl fmt::Display for LibSuffix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// User-facing knobs for a run, before host introspection is applied.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  pub target: TargetPlatform,
  pub debug: bool,
  pub regenerate: bool,
  /// Job count for the build tool; the host CPU count when `None`.
  pub jobs: Option<NonZeroUsize>,
  /// Build tool program; `scons` when `None`.
  pub build_tool: Option<PathBuf>,
}

impl BuildOptions {
  pub fn new(target: TargetPlatform) -> Self {
    Self {
      target,
      debug: false,
      regenerate: false,
      jobs: None,
      build_tool: None,
    }
  }
}

/// Immutable description of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  target_platform: TargetPlatform,
  target_arch: Arch,
  host_platform: TargetPlatform,
  host_os: Os,
  precision: Precision,
  debug: bool,
  regenerate: bool,
  parallelism: NonZeroUsize,
  lib_suffix: LibSuffix,
  build_tool: PathBuf,
}

impl BuildConfig {
  pub fn new(options: BuildOptions, host: &HostSnapshot) -> Self {
    let (target_arch, lib_suffix) = if options.target.is_mobile() {
      (Arch::Arm64, LibSuffix::StaticArchive)
    } else {
      (host.arch, LibSuffix::for_host(host.os))
    };

    Self {
      target_platform: options.target,
      target_arch,
      host_platform: host.build_platform(),
      host_os: host.os,
      precision: PIPELINE_PRECISION,
      debug: options.debug,
      regenerate: options.regenerate,
      parallelism: options.jobs.unwrap_or(host.cpus),
      lib_suffix,
      build_tool: options.build_tool.unwrap_or_else(|| PathBuf::from(BUILD_TOOL)),
    }
  }

  pub fn target_platform(&self) -> TargetPlatform {
    self.target_platform
  }

  pub fn target_arch(&self) -> Arch {
    self.target_arch
  }

  pub fn host_platform(&self) -> TargetPlatform {
    self.host_platform
  }

  pub fn host_os(&self) -> Os {
    self.host_os
  }

  pub fn precision(&self) -> Precision {
    self.precision
  }

  pub fn debug(&self) -> bool {
    self.debug
  }

  pub fn regenerate(&self) -> bool {
    self.regenerate
  }

  pub fn parallelism(&self) -> NonZeroUsize {
    self.parallelism
  }

  pub fn lib_suffix(&self) -> LibSuffix {
    self.lib_suffix
  }

  pub fn build_tool(&self) -> &PathBuf {
    &self.build_tool
  }

  /// Suffix of artifacts built for the target, e.g. `linuxbsd.x86_64.dev.double`.
  pub fn build_suffix(&self) -> String {
    let mut suffix = format!("{}.{}", self.target_platform, self.target_arch);
    if self.debug {
      suffix.push_str(".dev");
    }
    if self.precision == Precision::Double {
      suffix.push_str(".double");
    }
    suffix
  }

  /// File name of the host editor binary inside the engine's `bin` directory.
  ///
  /// The platform is the host's, the suffix the target's: a Windows target
  /// built on Linux runs `godot.linuxbsd.editor.windows.x86_64.double`.
  pub fn host_editor_name(&self) -> String {
    format!("godot.{}.editor.{}", self.host_platform, self.build_suffix())
  }

  /// File name of the target library inside the engine's `bin` directory.
  pub fn target_library_name(&self) -> String {
    format!("libgodot.{}.{}", self.build_suffix(), self.lib_suffix)
  }

  /// File name the target library is staged under in the build directory.
  pub fn staged_library_name(&self) -> String {
    format!("libgodot.{}", self.lib_suffix)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn host(os: Os, arch: Arch) -> HostSnapshot {
    HostSnapshot::new(os, arch, NonZeroUsize::new(16).unwrap())
  }

  #[test]
  fn target_parses_known_names_only() {
    assert_eq!("linuxbsd".parse::<TargetPlatform>(), Ok(TargetPlatform::LinuxBsd));
    assert_eq!("ios".parse::<TargetPlatform>(), Ok(TargetPlatform::Ios));
    assert_eq!(
      "android".parse::<TargetPlatform>(),
      Err(ParseTargetError("android".to_string()))
    );
    assert!("Linux".parse::<TargetPlatform>().is_err());
  }

  #[test]
  fn build_suffix_for_every_target() {
    for target in TargetPlatform::ALL {
      for debug in [false, true] {
        let mut options = BuildOptions::new(target);
        options.debug = debug;
        let config = BuildConfig::new(options, &host(Os::Linux, Arch::X86_64));

        let arch = if target.is_mobile() { "arm64" } else { "x86_64" };
        let dev = if debug { ".dev" } else { "" };
        assert_eq!(config.build_suffix(), format!("{}.{}{}.double", target.as_str(), arch, dev));
      }
    }
  }

  #[test]
  fn mobile_forces_arch_and_static_archive() {
    for os in [Os::Linux, Os::MacOs, Os::Windows] {
      let config = BuildConfig::new(BuildOptions::new(TargetPlatform::Ios), &host(os, Arch::X86_64));
      assert_eq!(config.target_arch(), Arch::Arm64);
      assert_eq!(config.lib_suffix(), LibSuffix::StaticArchive);
      assert_eq!(config.target_library_name(), "libgodot.ios.arm64.double.a");
    }
  }

  #[test]
  fn desktop_lib_suffix_follows_host() {
    let target = TargetPlatform::LinuxBsd;
    let linux = BuildConfig::new(BuildOptions::new(target), &host(Os::Linux, Arch::X86_64));
    let windows = BuildConfig::new(BuildOptions::new(target), &host(Os::Windows, Arch::X86_64));
    let macos = BuildConfig::new(BuildOptions::new(target), &host(Os::MacOs, Arch::Arm64));

    assert_eq!(linux.lib_suffix(), LibSuffix::So);
    assert_eq!(windows.lib_suffix(), LibSuffix::Dll);
    assert_eq!(macos.lib_suffix(), LibSuffix::Dylib);
    assert_eq!(macos.target_arch(), Arch::Arm64);
  }

  #[test]
  fn parallelism_defaults_to_host_cpus() {
    let config = BuildConfig::new(BuildOptions::new(TargetPlatform::Windows), &host(Os::Linux, Arch::X86_64));
    assert_eq!(config.parallelism().get(), 16);

    let mut options = BuildOptions::new(TargetPlatform::Windows);
    options.jobs = NonZeroUsize::new(3);
    let config = BuildConfig::new(options, &host(Os::Linux, Arch::X86_64));
    assert_eq!(config.parallelism().get(), 3);
  }

  #[test]
  fn host_editor_pairs_host_platform_with_target_suffix() {
    let mut options = BuildOptions::new(TargetPlatform::Windows);
    options.debug = true;
    let config = BuildConfig::new(options, &host(Os::Linux, Arch::X86_64));

    assert_eq!(config.host_editor_name(), "godot.linuxbsd.editor.windows.x86_64.dev.double");
    assert_eq!(config.target_library_name(), "libgodot.windows.x86_64.dev.double.so");
    assert_eq!(config.staged_library_name(), "libgodot.so");
  }

  #[test]
  fn cross_target_editor_name() {
    let config = BuildConfig::new(BuildOptions::new(TargetPlatform::Windows), &host(Os::Linux, Arch::X86_64));
    assert_eq!(config.host_editor_name(), "godot.linuxbsd.editor.windows.x86_64.double");

    let config = BuildConfig::new(BuildOptions::new(TargetPlatform::Ios), &host(Os::MacOs, Arch::X86_64));
    assert_eq!(config.host_editor_name(), "godot.macos.editor.ios.arm64.double");
  }

  #[test]
  fn native_editor_name_repeats_platform() {
    let config = BuildConfig::new(BuildOptions::new(TargetPlatform::Windows), &host(Os::Windows, Arch::X86_64));
    assert_eq!(config.host_editor_name(), "godot.windows.editor.windows.x86_64.double");
  }

  #[test]
  fn precision_is_fixed_double() {
    let config = BuildConfig::new(BuildOptions::new(TargetPlatform::MacOs), &host(Os::MacOs, Arch::Arm64));
    assert_eq!(config.precision(), Precision::Double);
    assert_eq!(config.build_tool(), &PathBuf::from("scons"));
  }
}
