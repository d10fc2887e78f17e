//! Implementation of the `gdbuild codegen` commands.
//!
//! Thin wrappers over the library generators that the engine's build invokes
//! to produce `.gen.h`/`.gen.cpp` files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use gdbuild_lib::codegen::{icon_header, platform_apis_source, write_generated};

use crate::output;

#[derive(Debug, Subcommand)]
pub enum CodegenCommands {
  /// Embed a platform export icon SVG as a C++ string constant
  Icon {
    /// Source SVG, e.g. platform/ios/export/logo.svg
    svg: PathBuf,

    /// Header to write
    output: PathBuf,
  },

  /// Generate the platform API registration source
  PlatformApis {
    /// Source file to write
    output: PathBuf,

    /// Platforms providing an api/api.h
    #[arg(required = true)]
    platforms: Vec<String>,
  },
}

pub fn cmd_codegen(command: CodegenCommands) -> Result<()> {
  let (path, body) = match command {
    CodegenCommands::Icon { svg, output } => {
      let body = icon_header(&svg).with_context(|| format!("Failed to embed icon {}", svg.display()))?;
      (output, body)
    }
    CodegenCommands::PlatformApis { output, platforms } => (output, platform_apis_source(&platforms)),
  };

  write_generated(&path, &body)?;
  output::print_success(&format!("Generated {}", path.display()));
  Ok(())
}
