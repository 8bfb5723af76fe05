//! Immutable site descriptor.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::integration::IntegrationSet;
use crate::navigation::NavTree;
use crate::theme::NamedTheme;

/// Social links by platform name.
pub type SocialLinks = BTreeMap<String, String>;

/// Site metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    /// Site title.
    pub title: String,
    /// Site description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Header logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

impl SiteMetadata {
    /// Metadata with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the logo.
    #[must_use]
    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Logo with light and dark variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    /// Light-mode asset path.
    pub light: String,
    /// Dark-mode asset path.
    pub dark: String,
    /// Alternative text.
    pub alt: String,
    /// Whether the logo replaces the title text.
    pub replaces_title: bool,
}

/// Highlighting themes and the selected pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// Registered themes in registration order.
    pub themes: Vec<NamedTheme>,
    /// Name of the light theme.
    pub light: String,
    /// Name of the dark theme.
    pub dark: String,
}

/// Composed site configuration consumed by the site build.
///
/// Created by [`Composer::compose`](crate::Composer::compose) only after every
/// check passed. There are no mutating methods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteDescriptor {
    metadata: SiteMetadata,
    social: SocialLinks,
    navigation: NavTree,
    integrations: IntegrationSet,
    highlight: Highlight,
}

impl SiteDescriptor {
    pub(crate) fn new(
        metadata: SiteMetadata,
        social: SocialLinks,
        navigation: NavTree,
        integrations: IntegrationSet,
        highlight: Highlight,
    ) -> Self {
        Self {
            metadata,
            social,
            navigation,
            integrations,
            highlight,
        }
    }

    /// Site metadata.
    #[must_use]
    pub fn metadata(&self) -> &SiteMetadata {
        &self.metadata
    }

    /// Social links.
    #[must_use]
    pub fn social(&self) -> &SocialLinks {
        &self.social
    }

    /// Sidebar.
    #[must_use]
    pub fn navigation(&self) -> &NavTree {
        &self.navigation
    }

    /// Integrations in processing order.
    #[must_use]
    pub fn integrations(&self) -> &IntegrationSet {
        &self.integrations
    }

    /// Highlighting themes.
    #[must_use]
    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_metadata_builder() {
        let metadata = SiteMetadata::new("NodeKit").with_description("Node manager");

        assert_eq!(metadata.title, "NodeKit");
        assert_eq!(metadata.description.as_deref(), Some("Node manager"));
        assert!(metadata.logo.is_none());
    }

    #[test]
    fn test_logo_serializes_camel_case() {
        let metadata = SiteMetadata::new("NodeKit").with_logo(Logo {
            light: "./public/light.png".to_owned(),
            dark: "./public/dark.png".to_owned(),
            alt: "NodeKit".to_owned(),
            replaces_title: true,
        });

        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "NodeKit",
                "logo": {
                    "light": "./public/light.png",
                    "dark": "./public/dark.png",
                    "alt": "NodeKit",
                    "replacesTitle": true
                }
            })
        );
    }
}
