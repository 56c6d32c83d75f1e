use std::path::{Path, PathBuf};

use crate::foundation::error::{EpicycleError, EpicycleResult};

/// Exclusive handle on an output file for the duration of one encode.
///
/// [`ArtifactGuard::prepare`] removes whatever is at the path. Until [`ArtifactGuard::commit`]
/// is called, dropping the guard deletes the file again, so a failed encode never leaves a
/// partial artifact behind.
#[derive(Debug)]
pub struct ArtifactGuard {
    path: PathBuf,
    armed: bool,
}

impl ArtifactGuard {
    /// Create the parent directory and remove any stale file at `path`.
    pub fn prepare(path: &Path) -> EpicycleResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                EpicycleError::artifact_write(
                    path,
                    format!("failed to create output directory '{}': {e}", parent.display()),
                )
            })?;
        }
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed existing artifact"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(EpicycleError::artifact_write(
                    path,
                    format!("failed to remove existing file: {e}"),
                ));
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            armed: true,
        })
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file: the encode finished.
    pub fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/artifact.rs"]
mod tests;
