//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for asset and content lookups, along
//! with [`StorageError`] for reporting read failures.
//!
//! # Path Convention
//!
//! Asset paths are relative to the project root and may carry a leading `./`
//! exactly as written in a configuration file (`"./public/logo.png"`).
//! Content directories are relative to the content root (`"guides"`,
//! `"reference/cli"`). Implementations normalize both through
//! [`normalize_path`].

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path escapes its root or is otherwise malformed.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Lookup abstraction for the files a site configuration references.
///
/// Composition never walks the project tree itself; every existence check and
/// every read goes through this trait so tests can run against memory.
pub trait Storage: Send + Sync {
    /// Check if an asset exists relative to the project root.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn asset_exists(&self, path: &str) -> bool;

    /// Check if a content directory exists relative to the content root.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn content_dir_exists(&self, dir: &str) -> bool;

    /// Read an asset as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the asset doesn't exist or can't be read.
    fn read_asset(&self, path: &str) -> Result<String, StorageError>;
}

/// Normalize a configuration path for lookup.
///
/// Drops `.` components and empty segments, so `"./public//logo.png"` and
/// `"public/logo.png"` name the same asset and `"guides/"` names the same
/// directory as `"guides"`. Parent components (`..`) are kept; backends
/// decide whether to reject them.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_normalize_path_strips_current_dir_prefix() {
        assert_eq!(normalize_path("./public/logo.png"), "public/logo.png");
    }

    #[test]
    fn test_normalize_path_strips_trailing_slash() {
        assert_eq!(normalize_path("guides/"), "guides");
    }

    #[test]
    fn test_normalize_path_collapses_empty_segments() {
        assert_eq!(normalize_path("reference//cli/./flags"), "reference/cli/flags");
    }

    #[test]
    fn test_normalize_path_keeps_parent_components() {
        assert_eq!(normalize_path("../outside"), "../outside");
    }

    #[test]
    fn test_normalize_path_root_is_empty() {
        assert_eq!(normalize_path("./"), "");
    }

    #[test]
    fn test_storage_error_not_found() {
        let err = StorageError::not_found("public/logo.png");

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("public/logo.png")));
    }

    #[test]
    fn test_storage_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StorageError::io(io_err, None);

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::InvalidPath);

        assert_eq!(err.to_string(), "Invalid path");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StorageError::new(StorageErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/project/public/logo.png")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: /project/public/logo.png)"
        );
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
