//! Embedded platform export icons.
//!
//! Each platform ships SVG icons under `platform/<name>/export/<icon>.svg`;
//! they are compiled in as `_<name>_<icon>_svg` string constants.

use std::path::Path;

use super::{CodegenError, to_raw_cstring};

/// Render the header body embedding the SVG at `svg_path`.
pub fn icon_header(svg_path: &Path) -> Result<String, CodegenError> {
  let (platform, name) = icon_names(svg_path)?;
  let svg = std::fs::read_to_string(svg_path).map_err(|source| CodegenError::Read {
    path: svg_path.to_path_buf(),
    source,
  })?;

  Ok(icon_declaration(&platform, &name, &svg))
}

fn icon_declaration(platform: &str, name: &str, svg: &str) -> String {
  format!(
    "inline constexpr const char *_{}_{}_svg = {};\n",
    platform,
    name,
    to_raw_cstring(svg)
  )
}

/// Platform (the icon's grandparent directory) and icon file stem.
fn icon_names(svg_path: &Path) -> Result<(String, String), CodegenError> {
  let invalid = || CodegenError::InvalidIconPath(svg_path.to_path_buf());

  let name = svg_path.file_stem().and_then(|s| s.to_str()).ok_or_else(invalid)?;
  let platform = svg_path
    .parent()
    .and_then(Path::parent)
    .and_then(Path::file_stem)
    .and_then(|s| s.to_str())
    .ok_or_else(invalid)?;

  Ok((platform.to_string(), name.to_string()))
}
