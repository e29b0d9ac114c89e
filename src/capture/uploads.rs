//! Ownership of uploaded temp files.

use std::path::PathBuf;

/// Temp files written for one request.
///
/// Every registered file is removed when the guard is dropped, unless the
/// paths were handed off with [`TempUploads::into_paths`].
#[derive(Debug, Default)]
pub struct TempUploads {
    paths: Vec<PathBuf>,
}

impl TempUploads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a temporary file for cleanup.
    pub fn register(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Take ownership of the paths. The files are no longer removed by this guard.
    pub fn into_paths(mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.paths)
    }

    /// Remove every registered file now.
    pub fn cleanup(&mut self) {
        remove_temp_files(self.paths.drain(..));
    }
}

impl Drop for TempUploads {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Remove files, ignoring ones already gone.
pub(crate) fn remove_temp_files(paths: impl IntoIterator<Item = PathBuf>) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to clean up temp file"
                );
            }
        }
    }
}
