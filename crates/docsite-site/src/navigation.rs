//! Sidebar navigation tree.
//!
//! A [`NavTree`] is an ordered list of [`NavEntry`] values. Sibling order is
//! exactly the order in which entries were added to the [`NavTreeBuilder`],
//! so the rendered sidebar is reproducible across builds.

use std::fmt;

use docsite_storage::Storage;
use serde::Serialize;

/// Sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NavEntry {
    /// Explicit link.
    Link {
        /// Display label.
        label: String,
        /// Site-absolute path or absolute URL.
        url: String,
    },
    /// Group whose children are derived from a content directory.
    AutogenGroup {
        /// Display label.
        label: String,
        /// Directory relative to the content root.
        directory: String,
        /// Whether the group starts collapsed.
        collapsed: bool,
    },
    /// Explicit nested group.
    Group {
        /// Display label.
        label: String,
        /// Whether the group starts collapsed.
        collapsed: bool,
        /// Child entries.
        items: NavTree,
    },
}

impl NavEntry {
    /// Display label of the entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link { label, .. }
            | Self::AutogenGroup { label, .. }
            | Self::Group { label, .. } => label,
        }
    }
}

/// Finalized, non-empty, ordered sidebar.
///
/// Only obtainable from [`NavTreeBuilder::build`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    entries: Vec<NavEntry>,
}

impl NavTree {
    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Iterate over entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, NavEntry> {
        self.entries.iter()
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries (never true for a built tree).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a NavTree {
    type Item = &'a NavEntry;
    type IntoIter = std::slice::Iter<'a, NavEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Navigation error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Autogenerated group references a directory that does not exist.
    #[error("sidebar group '{label}' references missing content directory '{directory}'")]
    MissingDirectory {
        /// Group label.
        label: String,
        /// Missing directory.
        directory: String,
    },
    /// No entries were added to the sidebar.
    #[error("sidebar has no entries")]
    EmptyTree,
    /// No entries were declared for a nested group.
    #[error("sidebar group '{label}' has no entries")]
    EmptyGroup {
        /// Group label.
        label: String,
    },
}

/// Builder for [`NavTree`].
///
/// Autogenerated groups are checked against content storage as they are
/// added; a missing directory is an error, never a silent skip.
pub struct NavTreeBuilder<'a> {
    storage: &'a dyn Storage,
    entries: Vec<NavEntry>,
}

impl fmt::Debug for NavTreeBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavTreeBuilder")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<'a> NavTreeBuilder<'a> {
    /// Create a builder that checks content directories against `storage`.
    #[must_use]
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self {
            storage,
            entries: Vec::new(),
        }
    }

    /// Create an empty builder for a nested group, sharing this builder's storage.
    #[must_use]
    pub fn child(&self) -> NavTreeBuilder<'a> {
        NavTreeBuilder::new(self.storage)
    }

    /// Append an explicit link.
    pub fn add_link(&mut self, label: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.entries.push(NavEntry::Link {
            label: label.into(),
            url: url.into(),
        });
        self
    }

    /// Append a group generated from a content directory.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::MissingDirectory`] if `directory` does not exist in
    /// content storage. Nothing is appended in that case.
    pub fn add_autogen_group(
        &mut self,
        label: impl Into<String>,
        directory: impl Into<String>,
        collapsed: bool,
    ) -> Result<&mut Self, NavError> {
        let label = label.into();
        let directory = directory.into();
        if !self.storage.content_dir_exists(&directory) {
            return Err(NavError::MissingDirectory { label, directory });
        }
        tracing::debug!(label = %label, directory = %directory, "Added autogenerated group");
        self.entries.push(NavEntry::AutogenGroup {
            label,
            directory,
            collapsed,
        });
        Ok(self)
    }

    /// Append an explicit nested group.
    pub fn add_group(
        &mut self,
        label: impl Into<String>,
        collapsed: bool,
        items: NavTree,
    ) -> &mut Self {
        self.entries.push(NavEntry::Group {
            label: label.into(),
            collapsed,
            items,
        });
        self
    }

    /// Whether no entries were added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finalize the tree.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyTree`] if no entries were added.
    pub fn build(self) -> Result<NavTree, NavError> {
        if self.entries.is_empty() {
            return Err(NavError::EmptyTree);
        }
        Ok(NavTree {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use docsite_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_content_dir("guides")
            .with_content_dir("reference")
    }

    fn labels(tree: &NavTree) -> Vec<&str> {
        tree.iter().map(NavEntry::label).collect()
    }

    #[test]
    fn test_build_preserves_insertion_order() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);
        builder
            .add_link("Guides", "/guides")
            .add_link("Troubleshooting", "/troubleshooting");

        let tree = builder.build().unwrap();

        assert_eq!(labels(&tree), vec!["Guides", "Troubleshooting"]);
    }

    #[test]
    fn test_build_reversed_calls_reverse_order() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);
        builder
            .add_link("Troubleshooting", "/troubleshooting")
            .add_link("Guides", "/guides");

        let tree = builder.build().unwrap();

        assert_eq!(labels(&tree), vec!["Troubleshooting", "Guides"]);
    }

    #[test]
    fn test_mixed_entries_keep_order() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);
        builder.add_autogen_group("Guides", "guides", false).unwrap();
        builder.add_link("Troubleshooting", "/troubleshooting");
        builder
            .add_autogen_group("Command Reference", "reference", true)
            .unwrap();

        let tree = builder.build().unwrap();

        assert_eq!(
            tree.entries(),
            &[
                NavEntry::AutogenGroup {
                    label: "Guides".to_owned(),
                    directory: "guides".to_owned(),
                    collapsed: false,
                },
                NavEntry::Link {
                    label: "Troubleshooting".to_owned(),
                    url: "/troubleshooting".to_owned(),
                },
                NavEntry::AutogenGroup {
                    label: "Command Reference".to_owned(),
                    directory: "reference".to_owned(),
                    collapsed: true,
                },
            ]
        );
    }

    #[test]
    fn test_autogen_group_missing_directory_fails() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);

        let err = builder
            .add_autogen_group("Tutorials", "tutorials", false)
            .unwrap_err();

        assert_eq!(
            err,
            NavError::MissingDirectory {
                label: "Tutorials".to_owned(),
                directory: "tutorials".to_owned(),
            }
        );
    }

    #[test]
    fn test_autogen_group_missing_directory_is_not_appended() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);
        builder.add_link("Home", "/");
        let _ = builder.add_autogen_group("Tutorials", "tutorials", false);

        let tree = builder.build().unwrap();

        assert_eq!(labels(&tree), vec!["Home"]);
    }

    #[test]
    fn test_builder_debug_lists_entries() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);
        builder.add_link("Home", "/");

        let debug = format!("{builder:?}");

        assert!(debug.starts_with("NavTreeBuilder { entries: [Link"));
        assert!(debug.ends_with(".. }"));
    }

    #[test]
    fn test_build_empty_fails() {
        let storage = storage();

        let err = NavTreeBuilder::new(&storage).build().unwrap_err();

        assert_eq!(err, NavError::EmptyTree);
    }

    #[test]
    fn test_nested_group() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);
        let mut child = builder.child();
        child.add_link("Changelog", "/changelog");
        child.add_autogen_group("API", "reference", false).unwrap();
        let items = child.build().unwrap();
        builder.add_group("More", true, items);

        let tree = builder.build().unwrap();

        match &tree.entries()[0] {
            NavEntry::Group {
                label,
                collapsed,
                items,
            } => {
                assert_eq!(label, "More");
                assert!(*collapsed);
                assert_eq!(labels(items), vec!["Changelog", "API"]);
            }
            other => panic!("Expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_tree_serializes_tagged_entries() {
        let storage = storage();
        let mut builder = NavTreeBuilder::new(&storage);
        builder.add_link("Troubleshooting", "/troubleshooting");
        builder.add_autogen_group("Guides", "guides", false).unwrap();

        let json = serde_json::to_value(builder.build().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "type": "link", "label": "Troubleshooting", "url": "/troubleshooting" },
                {
                "type": "autogenGroup",
                "label": "Guides",
                "directory": "guides",
                "collapsed": false
            }
            ])
        );
    }
}
