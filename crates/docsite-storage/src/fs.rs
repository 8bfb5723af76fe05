//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for checking assets and content directories on the
//! local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind, normalize_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Assets resolve against the project root, content directories against the
/// content root. A leading `/` is treated as root-relative rather than as a
/// filesystem absolute path.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use docsite_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("."), PathBuf::from("src/content/docs"));
/// let logo_ok = storage.asset_exists("./public/logo.png");
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Project root directory (assets).
    root: PathBuf,
    /// Content root directory (autogenerated sidebar groups).
    content_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `root` - Project root containing public assets and theme files
    /// * `content_dir` - Directory containing documentation content
    #[must_use]
    pub fn new(root: PathBuf, content_dir: PathBuf) -> Self {
        Self { root, content_dir }
    }

    /// Project root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Content root directory.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Resolve a configured path under `base`.
    ///
    /// Rejects paths containing parent directory components (`..`) so a
    /// configuration cannot reference files outside its root.
    fn resolve(base: &Path, path: &str) -> Result<PathBuf, StorageError> {
        let normalized = normalize_path(path);
        let relative = Path::new(&normalized);
        let has_parent_dir = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir));

        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(base.join(relative))
    }
}

impl Storage for FsStorage {
    fn asset_exists(&self, path: &str) -> bool {
        match Self::resolve(&self.root, path) {
            Ok(full) => full.is_file(),
            Err(e) => {
                tracing::debug!(path, error = %e, "Rejected asset path");
                false
            }
        }
    }

    fn content_dir_exists(&self, dir: &str) -> bool {
        match Self::resolve(&self.content_dir, dir) {
            Ok(full) => full.is_dir(),
            Err(e) => {
                tracing::debug!(dir, error = %e, "Rejected content directory");
                false
            }
        }
    }

    fn read_asset(&self, path: &str) -> Result<String, StorageError> {
        let full = Self::resolve(&self.root, path)?;
        fs::read_to_string(&full)
            .map_err(|e| StorageError::io(e, Some(full)).with_backend(BACKEND))
    }
}
