//! Pipeline planning.
//!
//! [`plan`] turns a configuration and a directory layout into the ordered
//! list of steps. It does not touch the filesystem; conditions that depend on
//! on-disk state (an existing API dump) are encoded in the steps themselves.

use crate::config::BuildConfig;
use crate::consts::DUMP_API_FLAG;
use crate::layout::DirectorySet;

use super::types::{Action, Invocation, PipelineStep, Stage};

/// Target kind passed to every build tool invocation.
const BUILD_TARGET: &str = "editor";

/// Compute the ordered steps of a pipeline run.
pub fn plan(config: &BuildConfig, dirs: &DirectorySet) -> Vec<PipelineStep> {
  let host_editor = dirs.engine_bin().join(config.host_editor_name());
  let api_file = dirs.api_file();
  let header = dirs.interface_header();
  let extension_dir = dirs.bindings_extension_dir();

  let mut steps = vec![
    PipelineStep::new(Stage::Cleanup, Action::RemoveIfExists { path: host_editor.clone() }),
    PipelineStep::new(
      Stage::HostEditorBuild,
      Action::Invoke {
        invocation: engine_build(config, dirs, config.host_platform().as_str(), "executable"),
      },
    ),
    PipelineStep::new(
      Stage::ApiDump,
      Action::Generate {
        invocation: Invocation::new(&host_editor).arg(DUMP_API_FLAG).current_dir(&dirs.build),
        output: api_file.clone(),
        force: config.regenerate(),
      },
    ),
    PipelineStep::new(
      Stage::TargetLibraryBuild,
      Action::Invoke {
        invocation: engine_build(config, dirs, config.target_platform().as_str(), "shared_library"),
      },
    ),
    PipelineStep::new(
      Stage::ArtifactStaging,
      Action::Copy {
        from: dirs.engine_bin().join(config.target_library_name()),
        to: dirs.build.join(config.staged_library_name()),
      },
    ),
    copy_into(Stage::ArtifactStaging, &api_file, &extension_dir),
    copy_into(Stage::ArtifactStaging, &header, &extension_dir),
    PipelineStep::new(
      Stage::BindingsBuild,
      Action::Invoke {
        invocation: bindings_build(config, dirs),
      },
    ),
  ];

  if config.target_platform().is_mobile() {
    steps.push(PipelineStep::new(
      Stage::MobilePackaging,
      Action::Invoke {
        invocation: Invocation::new(dirs.framework_script()).args([
          dirs.godot.display().to_string(),
          dirs.build.display().to_string(),
        ]),
      },
    ));
    steps.push(copy_into(Stage::MobilePackaging, &api_file, &dirs.swift_api_dir()));
    steps.push(copy_into(Stage::MobilePackaging, &header, &dirs.swift_header_dir()));
  }

  steps
}

fn engine_build(config: &BuildConfig, dirs: &DirectorySet, platform: &str, library_type: &str) -> Invocation {
  Invocation::new(config.build_tool())
    .args([
      format!("platform={}", platform),
      format!("target={}", BUILD_TARGET),
      format!("library_type={}", library_type),
      format!("precision={}", config.precision()),
      format!("-j{}", config.parallelism()),
    ])
    .current_dir(&dirs.godot)
}

fn bindings_build(config: &BuildConfig, dirs: &DirectorySet) -> Invocation {
  Invocation::new(config.build_tool())
    .args([
      format!("platform={}", config.target_platform()),
      format!("target={}", BUILD_TARGET),
      format!("precision={}", config.precision()),
      format!("arch={}", config.target_arch()),
      format!("-j{}", config.parallelism()),
    ])
    .current_dir(&dirs.godot_cpp)
}

/// Copy `file` into `dir`, keeping its file name.
fn copy_into(stage: Stage, file: &std::path::Path, dir: &std::path::Path) -> PipelineStep {
  let to = match file.file_name() {
    Some(name) => dir.join(name),
    None => dir.to_path_buf(),
  };
  PipelineStep::new(
    stage,
    Action::Copy {
      from: file.to_path_buf(),
      to,
    },
  )
}
