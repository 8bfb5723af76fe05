//! Asset and content lookup for docsite configuration checks.
//!
//! This crate provides a [`Storage`] trait that answers the only I/O questions
//! site composition ever asks:
//!
//! - does an asset (logo, theme file, stylesheet) exist under the project root
//! - does a content directory exist under the content root
//! - what are the contents of an asset
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `asset_exists()`, `content_dir_exists()` and `read_asset()`
//! - [`FsStorage`] implementation backed by the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docsite_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("."), PathBuf::from("src/content/docs"));
//! assert!(storage.content_dir_exists("guides"));
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind, normalize_path};
