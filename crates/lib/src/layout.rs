//! Sibling project layout.
//!
//! All directories the pipeline reads from or writes to live next to each
//! other under one base directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::{API_FILE_NAME, FRAMEWORK_SCRIPT_NAME, INTERFACE_HEADER_NAME};

/// Absolute paths of the projects the pipeline works across.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySet {
  /// Engine source root.
  pub godot: PathBuf,
  /// Companion C++ bindings root.
  pub godot_cpp: PathBuf,
  /// Swift language bindings root, only used for mobile targets.
  pub swift_godot: PathBuf,
  /// Build output root, created on demand.
  pub build: PathBuf,
  /// Secondary output root of the Zig bindings.
  pub zig_out: PathBuf,
}

impl DirectorySet {
  /// Resolve every directory relative to `base`.
  pub fn resolve(base: &Path) -> Self {
    Self {
      godot: base.join("godot"),
      godot_cpp: base.join("godot-cpp"),
      swift_godot: base.join("SwiftGodot"),
      build: base.join("build"),
      zig_out: base.join("godot-zig").join("zig-out").join("bin"),
    }
  }

  /// Directory the engine build tool writes binaries to.
  pub fn engine_bin(&self) -> PathBuf {
    self.godot.join("bin")
  }

  /// The API description JSON dumped by the host editor.
  pub fn api_file(&self) -> PathBuf {
    self.build.join(API_FILE_NAME)
  }

  /// The engine's extension interface header.
  pub fn interface_header(&self) -> PathBuf {
    self.godot.join("core").join("extension").join(INTERFACE_HEADER_NAME)
  }

  /// Where the C++ bindings expect the API file and interface header.
  pub fn bindings_extension_dir(&self) -> PathBuf {
    self.godot_cpp.join("gdextension")
  }

  pub fn swift_api_dir(&self) -> PathBuf {
    self.swift_godot.join("Sources").join("ExtensionApi")
  }

  pub fn swift_header_dir(&self) -> PathBuf {
    self.swift_godot.join("Sources").join("GDExtension").join("include")
  }

  /// Helper script that assembles the mobile framework bundle.
  pub fn framework_script(&self) -> PathBuf {
    self.swift_godot.join("scripts").join(FRAMEWORK_SCRIPT_NAME)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_siblings_of_base() {
    let base = Path::new("/work");
    let dirs = DirectorySet::resolve(base);

    assert_eq!(dirs.godot, base.join("godot"));
    assert_eq!(dirs.godot_cpp, base.join("godot-cpp"));
    assert_eq!(dirs.swift_godot, base.join("SwiftGodot"));
    assert_eq!(dirs.build, base.join("build"));
    assert_eq!(dirs.zig_out, base.join("godot-zig").join("zig-out").join("bin"));
  }

  #[test]
  fn well_known_files() {
    let base = Path::new("/work");
    let dirs = DirectorySet::resolve(base);

    assert_eq!(dirs.api_file(), base.join("build").join("extension_api.json"));
    assert_eq!(
      dirs.interface_header(),
      base.join("godot").join("core").join("extension").join("gdextension_interface.h")
    );
    assert_eq!(dirs.bindings_extension_dir(), base.join("godot-cpp").join("gdextension"));
    assert_eq!(
      dirs.framework_script(),
      base.join("SwiftGodot").join("scripts").join("make-libgodot.framework")
    );
  }
}
