//! Build-time C++ source generators.
//!
//! The engine tree generates a handful of small sources during its build:
//! embedded platform icons and the platform API registration unit. Every
//! generated file shares the same wrapper: a banner, an include guard for
//! headers, and the trimmed body.

pub mod icon;
pub mod platform_apis;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use icon::icon_header;
pub use platform_apis::platform_apis_source;

/// Longest raw string literal emitted before splitting; some compilers cap literal length.
const MAX_LITERAL: usize = 16 * 1024;

const BANNER: &str = "/* THIS FILE IS GENERATED. EDITS WILL BE LOST. */";

const HEADER_EXTENSIONS: [&str; 5] = ["h", "hh", "hpp", "hxx", "inc"];

#[derive(Debug, Error)]
pub enum CodegenError {
  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot derive an icon name from {}", .0.display())]
  InvalidIconPath(PathBuf),
}

/// Wrap `body` in the generated-file boilerplate for a file at `path`.
pub fn generated_wrapper(path: &Path, body: &str) -> String {
  let mut out = String::new();
  out.push_str(BANNER);
  out.push_str("\n\n");

  let is_header = path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext));
  if is_header {
    out.push_str("#pragma once\n\n");
  }

  let body = body.trim();
  out.push_str(if body.is_empty() { "/* NO CONTENT */" } else { body });
  out.push('\n');
  out
}

/// Write `body` to `path` inside the generated-file wrapper.
pub fn write_generated(path: &Path, body: &str) -> Result<(), CodegenError> {
  let contents = generated_wrapper(path, body);
  std::fs::write(path, &contents).map_err(|source| CodegenError::Write {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), bytes = contents.len(), "wrote generated file");
  Ok(())
}

/// Encode `value` as a C++ raw string literal.
///
/// Values longer than 16 KiB become several adjacent literals wrapped in
/// parentheses. Splits prefer the end of a blank line and never fall inside a
/// UTF-8 sequence.
pub fn to_raw_cstring(value: &str) -> String {
  let segments = split_literal(value);
  if let [single] = segments.as_slice() {
    return raw_literal(single);
  }

  let literals: Vec<String> = segments.iter().map(|s| raw_literal(s)).collect();
  format!("({})", literals.join(" "))
}

fn raw_literal(segment: &str) -> String {
  format!("R\"<!>({})<!>\"", segment)
}

fn split_literal(value: &str) -> Vec<&str> {
  let mut segments = Vec::new();
  let mut rest = value;

  while rest.len() > MAX_LITERAL {
    let mut end = MAX_LITERAL;
    while !rest.is_char_boundary(end) {
      end -= 1;
    }

    let window = &rest[..end];
    let cut = window.rfind("\n\n").map_or(end, |i| i + 1);
    segments.push(&rest[..cut]);
    rest = &rest[cut..];
  }

  segments.push(rest);
  segments
}
