//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};

use crate::storage::{Storage, StorageError, normalize_path};

/// Mock storage for testing.
///
/// Stores assets and content directories in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use docsite_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_asset("public/logo.png")
///     .with_content_dir("guides");
///
/// assert!(storage.asset_exists("./public/logo.png"));
/// assert!(storage.content_dir_exists("guides"));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    assets: HashMap<String, String>,
    content_dirs: HashSet<String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty asset at the given path.
    #[must_use]
    pub fn with_asset(self, path: &str) -> Self {
        self.with_asset_content(path, "")
    }

    /// Add an asset with text content.
    #[must_use]
    pub fn with_asset_content(mut self, path: &str, content: impl Into<String>) -> Self {
        self.assets.insert(normalize_path(path), content.into());
        self
    }

    /// Add a content directory.
    ///
    /// Every ancestor of the directory is registered as well, matching a
    /// real filesystem where `reference/cli` implies `reference`.
    #[must_use]
    pub fn with_content_dir(mut self, dir: &str) -> Self {
        let normalized = normalize_path(dir);
        let mut prefix = String::new();
        for segment in normalized.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            self.content_dirs.insert(prefix.clone());
        }
        self
    }
}

impl Storage for MockStorage {
    fn asset_exists(&self, path: &str) -> bool {
        self.assets.contains_key(&normalize_path(path))
    }

    fn content_dir_exists(&self, dir: &str) -> bool {
        self.content_dirs.contains(&normalize_path(dir))
    }

    fn read_asset(&self, path: &str) -> Result<String, StorageError> {
        self.assets
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }
}
