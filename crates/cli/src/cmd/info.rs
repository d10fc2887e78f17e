use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use gdbuild_lib::config::TargetPlatform;
use gdbuild_lib::layout::DirectorySet;
use gdbuild_lib::platform::HostSnapshot;

use super::resolve_root;
use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct Info<'a> {
  version: &'static str,
  host: &'a HostSnapshot,
  host_build_platform: TargetPlatform,
  root: &'a Path,
  dirs: &'a DirectorySet,
}

pub fn cmd_info(root: Option<PathBuf>, format: OutputFormat) -> Result<()> {
  let host = HostSnapshot::probe().context("Failed to probe host platform")?;
  let root = resolve_root(root)?;
  let dirs = DirectorySet::resolve(&root);

  let info = Info {
    version: env!("CARGO_PKG_VERSION"),
    host: &host,
    host_build_platform: host.build_platform(),
    root: &root,
    dirs: &dirs,
  };

  if format.is_json() {
    return output::print_json(&info);
  }

  output::print_info(&format!("gdbuild v{}", info.version));
  output::print_stat("OS", host.os.as_str());
  output::print_stat("Arch", host.arch.as_str());
  output::print_stat("CPUs", &host.cpus.to_string());
  output::print_stat("Build platform", info.host_build_platform.as_str());
  output::print_stat("Root", &root.display().to_string());

  for (label, dir) in [
    ("Engine", &dirs.godot),
    ("C++ bindings", &dirs.godot_cpp),
    ("Swift bindings", &dirs.swift_godot),
    ("Build output", &dirs.build),
    ("Zig output", &dirs.zig_out),
  ] {
    let state = if dir.is_dir() { "" } else { " (missing)" };
    output::print_stat(label, &format!("{}{}", dir.display(), state));
  }

  Ok(())
}
