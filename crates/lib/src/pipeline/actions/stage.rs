//! Filesystem steps: removal, directory creation and artifact copies.

use std::path::Path;

use tracing::{debug, info};

use crate::pipeline::types::{PipelineError, Stage};

/// Delete `path` if it exists.
pub async fn remove_if_exists(stage: Stage, path: &Path) -> Result<(), PipelineError> {
  match tokio::fs::remove_file(path).await {
    Ok(()) => {
      info!(path = %path.display(), "removed stale binary");
      Ok(())
    }
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "nothing to remove");
      Ok(())
    }
    Err(source) => Err(PipelineError::Unknown {
      stage,
      message: format!("failed to remove {}", path.display()),
      source,
    }),
  }
}

/// Create `dir` and its parents.
pub async fn ensure_dir(stage: Stage, dir: &Path) -> Result<(), PipelineError> {
  tokio::fs::create_dir_all(dir)
    .await
    .map_err(|source| PipelineError::Unknown {
      stage,
      message: format!("failed to create {}", dir.display()),
      source,
    })
}

/// Whether `path` exists. Permission errors count as absent.
pub async fn exists(path: &Path) -> bool {
  tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Copy `from` to `to` without creating any directories.
pub async fn copy_file(stage: Stage, from: &Path, to: &Path) -> Result<(), PipelineError> {
  if !tokio::fs::metadata(from).await.is_ok_and(|m| m.is_file()) {
    return Err(PipelineError::Staging {
      stage,
      path: from.to_path_buf(),
      message: "source file does not exist".to_string(),
    });
  }

  if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
    if !tokio::fs::metadata(parent).await.is_ok_and(|m| m.is_dir()) {
      return Err(PipelineError::Staging {
        stage,
        path: parent.to_path_buf(),
        message: "destination directory does not exist".to_string(),
      });
    }
  }

  let bytes = tokio::fs::copy(from, to).await.map_err(|e| PipelineError::Staging {
    stage,
    path: to.to_path_buf(),
    message: format!("copy from {} failed ({})", from.display(), e),
  })?;

  debug!(from = %from.display(), to = %to.display(), bytes, "copied");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[tokio::test]
  async fn remove_missing_file_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent");

    remove_if_exists(Stage::Cleanup, &path).await.unwrap();
  }

  #[tokio::test]
  async fn remove_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("editor");
    std::fs::write(&path, b"binary").unwrap();

    remove_if_exists(Stage::Cleanup, &path).await.unwrap();
    assert!(!path.exists());
  }

  #[tokio::test]
  async fn ensure_dir_creates_parents() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("a").join("b");

    ensure_dir(Stage::ApiDump, &dir).await.unwrap();
    ensure_dir(Stage::ApiDump, &dir).await.unwrap();
    assert!(dir.is_dir());
  }

  #[tokio::test]
  async fn copy_into_existing_dir() {
    let temp_dir = TempDir::new().unwrap();
    let from = temp_dir.path().join("api.json");
    let to = temp_dir.path().join("api-copy.json");
    std::fs::write(&from, "{}").unwrap();

    copy_file(Stage::ArtifactStaging, &from, &to).await.unwrap();
    assert_eq!(std::fs::read_to_string(&to).unwrap(), "{}");
  }

  #[tokio::test]
  async fn copy_missing_source_is_staging_error() {
    let temp_dir = TempDir::new().unwrap();
    let from = temp_dir.path().join("libgodot.so");

    let err = copy_file(Stage::ArtifactStaging, &from, &temp_dir.path().join("out"))
      .await
      .unwrap_err();

    assert!(matches!(err, PipelineError::Staging { ref path, .. } if path == &from));
  }

  #[tokio::test]
  async fn copy_does_not_create_destination_dir() {
    let temp_dir = TempDir::new().unwrap();
    let from = temp_dir.path().join("header.h");
    std::fs::write(&from, "#pragma once").unwrap();
    let missing_dir = temp_dir.path().join("gdextension");

    let err = copy_file(Stage::ArtifactStaging, &from, &missing_dir.join("header.h"))
      .await
      .unwrap_err();

    assert!(matches!(err, PipelineError::Staging { ref path, .. } if path == &missing_dir));
    assert!(!missing_dir.exists());
  }
}
