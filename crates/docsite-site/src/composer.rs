//! Site descriptor composition.
//!
//! [`Composer`] checks every cross-reference between the composed parts and
//! the project files, collecting all defects before deciding. A descriptor
//! is returned only when no defect was found; otherwise the caller gets one
//! [`CompositionError`] listing everything that needs fixing.

use std::fmt;

use docsite_config::{ThemeSource, ThemeVariant};
use docsite_storage::Storage;

use crate::descriptor::{Highlight, SiteDescriptor, SiteMetadata, SocialLinks};
use crate::integration::{IntegrationError, IntegrationSet};
use crate::navigation::{NavEntry, NavError, NavTree};
use crate::theme::{ThemeError, ThemePair, ThemeRegistry};

/// A single composition defect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Defect {
    /// Theme registry defect.
    #[error(transparent)]
    Theme(#[from] ThemeError),
    /// Navigation defect.
    #[error(transparent)]
    Navigation(#[from] NavError),
    /// Integration defect.
    #[error(transparent)]
    Integration(#[from] IntegrationError),
    /// Referenced asset does not exist.
    #[error("{field}: asset '{path}' does not exist")]
    MissingAsset {
        /// Field that references the asset.
        field: String,
        /// Asset path as declared.
        path: String,
    },
    /// URL is not well-formed.
    #[error("{field}: '{url}' is not a valid URL ({reason})")]
    InvalidUrl {
        /// Field holding the URL.
        field: String,
        /// URL as declared.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Required field is empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Field name.
        field: String,
    },
    /// Theme file declares a different variant than registered.
    #[error("theme '{name}' is registered as {registered} but its file declares {declared}")]
    ThemeVariantMismatch {
        /// Theme name.
        name: String,
        /// Registered variant.
        registered: ThemeVariant,
        /// Variant declared in the theme file.
        declared: ThemeVariant,
    },
    /// Declaration is malformed.
    #[error("{field}: {message}")]
    InvalidDeclaration {
        /// Field name.
        field: String,
        /// What is wrong.
        message: String,
    },
}

/// Composition failed; lists every defect found.
#[derive(Debug, PartialEq, Eq)]
pub struct CompositionError {
    defects: Vec<Defect>,
}

impl CompositionError {
    pub(crate) fn new(defects: Vec<Defect>) -> Self {
        Self { defects }
    }

    /// Defects in discovery order.
    #[must_use]
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// Number of defects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defects.len()
    }

    /// Whether there are no defects (never true for a returned error).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.defects.len() == 1 {
            "defect"
        } else {
            "defects"
        };
        write!(
            f,
            "site composition failed with {} {noun}:",
            self.defects.len()
        )?;
        for defect in &self.defects {
            write!(f, "\n  - {defect}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositionError {}

/// Composes a [`SiteDescriptor`] and validates its cross-references.
pub struct Composer<'a> {
    storage: &'a dyn Storage,
}

impl<'a> Composer<'a> {
    /// Create a composer that checks file references against `storage`.
    #[must_use]
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Compose all parts into one descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] listing every defect found. No partial
    /// descriptor is ever returned.
    pub fn compose(
        &self,
        metadata: SiteMetadata,
        social: SocialLinks,
        navigation: NavTree,
        integrations: IntegrationSet,
        themes: &ThemeRegistry,
    ) -> Result<SiteDescriptor, CompositionError> {
        let mut defects = Vec::new();
        self.check_metadata(&metadata, &mut defects);
        Self::check_social(&social, &mut defects);
        Self::check_navigation(&navigation, &mut defects);
        self.check_integrations(&integrations, &mut defects);
        let pair = self.check_themes(themes, &mut defects);

        match pair {
            Some(pair) if defects.is_empty() => {
                tracing::info!(
                    title = %metadata.title,
                    sidebar_entries = navigation.len(),
                    integrations = integrations.len(),
                    light = %pair.light.name,
                    dark = %pair.dark.name,
                    "Composed site descriptor"
                );
                let highlight = Highlight {
                    themes: themes.themes().to_vec(),
                    light: pair.light.name,
                    dark: pair.dark.name,
                };
                Ok(SiteDescriptor::new(
                    metadata,
                    social,
                    navigation,
                    integrations,
                    highlight,
                ))
            }
            _ => Err(CompositionError::new(defects)),
        }
    }

    /// Check title and logo assets.
    pub(crate) fn check_metadata(&self, metadata: &SiteMetadata, defects: &mut Vec<Defect>) {
        let replaces_title = metadata.logo.as_ref().is_some_and(|logo| logo.replaces_title);
        if metadata.title.trim().is_empty() && !replaces_title {
            defects.push(Defect::EmptyField {
                field: "site.title".to_owned(),
            });
        }

        let Some(logo) = &metadata.logo else {
            return;
        };
        for (field, path) in [("site.logo.light", &logo.light), ("site.logo.dark", &logo.dark)] {
            if !self.storage.asset_exists(path) {
                defects.push(Defect::MissingAsset {
                    field: field.to_owned(),
                    path: path.clone(),
                });
            }
        }
        if logo.replaces_title && logo.alt.trim().is_empty() {
            defects.push(Defect::EmptyField {
                field: "site.logo.alt".to_owned(),
            });
        }
    }

    /// Check that every social link is an absolute http(s) URL.
    pub(crate) fn check_social(social: &SocialLinks, defects: &mut Vec<Defect>) {
        for (platform, link) in social {
            let field = format!("social.{platform}");
            match url::Url::parse(link) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => defects.push(Defect::InvalidUrl {
                    field,
                    url: link.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                }),
                Err(e) => defects.push(Defect::InvalidUrl {
                    field,
                    url: link.clone(),
                    reason: e.to_string(),
                }),
            }
        }
    }

    /// Check labels and link targets throughout the sidebar.
    pub(crate) fn check_navigation(navigation: &NavTree, defects: &mut Vec<Defect>) {
        Self::check_nav_entries(navigation, "sidebar", defects);
    }

    fn check_nav_entries(tree: &NavTree, field: &str, defects: &mut Vec<Defect>) {
        for (i, entry) in tree.iter().enumerate() {
            let entry_field = format!("{field}[{i}]");
            Self::check_nav_label(entry.label(), &entry_field, defects);
            match entry {
                NavEntry::Link { url, .. } => Self::check_nav_link(url, &entry_field, defects),
                NavEntry::AutogenGroup { .. } => {}
                NavEntry::Group { items, .. } => {
                    Self::check_nav_entries(items, &format!("{entry_field}.items"), defects);
                }
            }
        }
    }

    /// Check the label of the sidebar entry at `entry_field`.
    pub(crate) fn check_nav_label(label: &str, entry_field: &str, defects: &mut Vec<Defect>) {
        if label.trim().is_empty() {
            defects.push(Defect::EmptyField {
                field: format!("{entry_field}.label"),
            });
        }
    }

    /// Check the link target of the sidebar entry at `entry_field`.
    pub(crate) fn check_nav_link(url: &str, entry_field: &str, defects: &mut Vec<Defect>) {
        if let Err(reason) = check_link(url) {
            defects.push(Defect::InvalidUrl {
                field: format!("{entry_field}.link"),
                url: url.to_owned(),
                reason,
            });
        }
    }

    /// Check asset paths referenced by integration options.
    pub(crate) fn check_integrations(
        &self,
        integrations: &IntegrationSet,
        defects: &mut Vec<Defect>,
    ) {
        for asset in integrations.assets() {
            if !self.storage.asset_exists(&asset.path) {
                defects.push(Defect::MissingAsset {
                    field: format!("integrations.{}.{}", asset.integration, asset.option),
                    path: asset.path.clone(),
                });
            }
        }
    }

    /// Check the theme pair and theme files.
    ///
    /// Returns the pair if one exists, even when theme files have defects.
    pub(crate) fn check_themes(
        &self,
        themes: &ThemeRegistry,
        defects: &mut Vec<Defect>,
    ) -> Option<ThemePair> {
        for theme in themes.themes() {
            let ThemeSource::File(path) = &theme.definition.source else {
                continue;
            };
            if !self.storage.asset_exists(path) {
                defects.push(Defect::MissingAsset {
                    field: format!("highlight.themes.{}", theme.name),
                    path: path.clone(),
                });
                continue;
            }
            if let Some(declared) = self.declared_variant(path)
                && declared != theme.definition.variant
            {
                defects.push(Defect::ThemeVariantMismatch {
                    name: theme.name.clone(),
                    registered: theme.definition.variant,
                    declared,
                });
            }
        }

        match themes.list_paired() {
            Ok(pair) => Some(pair),
            Err(e) => {
                defects.push(e.into());
                None
            }
        }
    }

    /// Read the `type` field of a theme JSON file.
    fn declared_variant(&self, path: &str) -> Option<ThemeVariant> {
        let content = match self.storage.read_asset(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path, error = %e, "Failed to read theme file");
                return None;
            }
        };
        let json: serde_json::Value = match serde_json::from_str(&content) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(path, error = %e, "Failed to parse theme file");
                return None;
            }
        };
        json.get("type")
            .and_then(serde_json::Value::as_str)
            .and_then(ThemeVariant::from_name)
    }
}

/// Accept site-absolute paths (`/guides`) and absolute URLs.
fn check_link(link: &str) -> Result<(), String> {
    if link.starts_with('/') && !link.starts_with("//") {
        return Ok(());
    }
    url::Url::parse(link).map(|_| ()).map_err(|e| e.to_string())
}
