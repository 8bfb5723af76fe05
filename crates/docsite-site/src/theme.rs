//! Syntax-highlighting theme registry.
//!
//! Themes are registered under unique names and kept in registration order.
//! The registry yields the light/dark [`ThemePair`] used for dual-mode code
//! highlighting: either an explicitly preferred pair, or the first registered
//! light theme together with the first registered dark theme.

use std::collections::HashMap;

use docsite_config::{ThemeSource, ThemeVariant};
use serde::Serialize;

/// Theme definition independent of its registered name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeDefinition {
    /// Light or dark variant.
    pub variant: ThemeVariant,
    /// Where the theme comes from.
    pub source: ThemeSource,
}

impl ThemeDefinition {
    /// Theme bundled with the highlighting engine.
    #[must_use]
    pub fn bundled(variant: ThemeVariant, id: impl Into<String>) -> Self {
        Self {
            variant,
            source: ThemeSource::Bundled(id.into()),
        }
    }

    /// Theme loaded from a JSON file relative to the project root.
    #[must_use]
    pub fn file(variant: ThemeVariant, path: impl Into<String>) -> Self {
        Self {
            variant,
            source: ThemeSource::File(path.into()),
        }
    }
}

/// Theme definition with its registered name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamedTheme {
    /// Registered name.
    pub name: String,
    /// Definition.
    #[serde(flatten)]
    pub definition: ThemeDefinition,
}

/// Light and dark theme used together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemePair {
    /// Light-mode theme.
    pub light: NamedTheme,
    /// Dark-mode theme.
    pub dark: NamedTheme,
}

/// Theme registry error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// A theme with this name is already registered.
    #[error("theme '{name}' is already registered")]
    DuplicateTheme {
        /// Theme name.
        name: String,
    },
    /// No theme with this name is registered.
    #[error("unknown theme '{name}'")]
    UnknownTheme {
        /// Theme name.
        name: String,
    },
    /// No valid light/dark pair can be formed.
    #[error("no light/dark theme pair: {reason}")]
    MissingPair {
        /// What is missing.
        reason: String,
    },
}

/// Registry of named syntax-highlighting themes.
#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    themes: Vec<NamedTheme>,
    index: HashMap<String, usize>,
    preferred: Option<(String, String)>,
}

impl ThemeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a theme under a unique name.
    ///
    /// The same definition may be registered under several names.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::DuplicateTheme`] if `name` is already registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        definition: ThemeDefinition,
    ) -> Result<(), ThemeError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ThemeError::DuplicateTheme { name });
        }
        tracing::debug!(theme = %name, variant = %definition.variant, "Registered theme");
        self.index.insert(name.clone(), self.themes.len());
        self.themes.push(NamedTheme { name, definition });
        Ok(())
    }

    /// Look up a theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] if `name` is not registered.
    pub fn resolve(&self, name: &str) -> Result<&ThemeDefinition, ThemeError> {
        self.lookup(name).map(|theme| &theme.definition)
    }

    /// Prefer an explicit default pair.
    ///
    /// Names are checked by [`ThemeRegistry::list_paired`], so the pair may be
    /// set before its themes are registered.
    pub fn prefer_pair(&mut self, light: impl Into<String>, dark: impl Into<String>) {
        self.preferred = Some((light.into(), dark.into()));
    }

    /// Get the default light/dark pair.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownTheme`] if a preferred theme is not
    /// registered, and [`ThemeError::MissingPair`] if a preferred theme has
    /// the wrong variant or no light or dark theme is registered at all.
    pub fn list_paired(&self) -> Result<ThemePair, ThemeError> {
        if let Some((light, dark)) = &self.preferred {
            return Ok(ThemePair {
                light: self.lookup_variant(light, ThemeVariant::Light)?.clone(),
                dark: self.lookup_variant(dark, ThemeVariant::Dark)?.clone(),
            });
        }

        let first = |variant| {
            self.themes
                .iter()
                .find(|theme| theme.definition.variant == variant)
        };
        match (first(ThemeVariant::Light), first(ThemeVariant::Dark)) {
            (Some(light), Some(dark)) => Ok(ThemePair {
                light: light.clone(),
                dark: dark.clone(),
            }),
            (None, Some(_)) => Err(ThemeError::MissingPair {
                reason: "no light theme registered".to_owned(),
            }),
            (Some(_), None) => Err(ThemeError::MissingPair {
                reason: "no dark theme registered".to_owned(),
            }),
            (None, None) => Err(ThemeError::MissingPair {
                reason: "no themes registered".to_owned(),
            }),
        }
    }

    /// All registered themes in registration order.
    #[must_use]
    pub fn themes(&self) -> &[NamedTheme] {
        &self.themes
    }

    /// Number of registered themes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether no themes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&NamedTheme, ThemeError> {
        self.index
            .get(name)
            .map(|&i| &self.themes[i])
            .ok_or_else(|| ThemeError::UnknownTheme {
                name: name.to_owned(),
            })
    }

    fn lookup_variant(
        &self,
        name: &str,
        expected: ThemeVariant,
    ) -> Result<&NamedTheme, ThemeError> {
        let theme = self.lookup(name)?;
        if theme.definition.variant != expected {
            return Err(ThemeError::MissingPair {
                reason: format!(
                    "theme '{name}' is {}, expected {expected}",
                    theme.definition.variant
                ),
            });
        }
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn latte() -> ThemeDefinition {
        ThemeDefinition::bundled(ThemeVariant::Light, "catppuccin-latte")
    }

    fn mocha() -> ThemeDefinition {
        ThemeDefinition::bundled(ThemeVariant::Dark, "catppuccin-mocha")
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ThemeRegistry::new();
        registry.register("latte", latte()).unwrap();

        assert_eq!(registry.resolve("latte").unwrap(), &latte());
    }

    #[test]
    fn test_register_duplicate_name_fails() {
        let mut registry = ThemeRegistry::new();
        registry.register("latte", latte()).unwrap();

        let err = registry.register("latte", mocha()).unwrap_err();

        assert_eq!(
            err,
            ThemeError::DuplicateTheme {
                name: "latte".to_owned()
            }
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("latte").unwrap(), &latte());
    }

    #[test]
    fn test_register_same_definition_under_two_names() {
        let mut registry = ThemeRegistry::new();
        registry.register("latte", latte()).unwrap();
        registry.register("default-light", latte()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("default-light").unwrap(), &latte());
    }

    #[test]
    fn test_resolve_unknown_fails() {
        let registry = ThemeRegistry::new();

        let err = registry.resolve("frappe").unwrap_err();

        assert_eq!(
            err,
            ThemeError::UnknownTheme {
                name: "frappe".to_owned()
            }
        );
    }

    #[test]
    fn test_list_paired_uses_first_of_each_variant() {
        let mut registry = ThemeRegistry::new();
        registry.register("mocha", mocha()).unwrap();
        registry.register("latte", latte()).unwrap();
        registry
            .register("github-light", ThemeDefinition::bundled(ThemeVariant::Light, "github-light"))
            .unwrap();

        let pair = registry.list_paired().unwrap();

        assert_eq!(pair.light.name, "latte");
        assert_eq!(pair.dark.name, "mocha");
    }

    #[test]
    fn test_list_paired_without_dark_fails() {
        let mut registry = ThemeRegistry::new();
        registry.register("latte", latte()).unwrap();

        let err = registry.list_paired().unwrap_err();

        assert!(matches!(err, ThemeError::MissingPair { .. }));
        assert!(err.to_string().contains("no dark theme"));
    }

    #[test]
    fn test_list_paired_empty_registry_fails() {
        let err = ThemeRegistry::new().list_paired().unwrap_err();

        assert!(err.to_string().contains("no themes registered"));
    }

    #[test]
    fn test_list_paired_prefers_explicit_pair() {
        let mut registry = ThemeRegistry::new();
        registry.register("latte", latte()).unwrap();
        registry.register("mocha", mocha()).unwrap();
        registry
            .register("dracula", ThemeDefinition::bundled(ThemeVariant::Dark, "dracula"))
            .unwrap();
        registry.prefer_pair("latte", "dracula");

        let pair = registry.list_paired().unwrap();

        assert_eq!(pair.light.name, "latte");
        assert_eq!(pair.dark.name, "dracula");
    }

    #[test]
    fn test_list_paired_preferred_unknown_fails() {
        let mut registry = ThemeRegistry::new();
        registry.register("latte", latte()).unwrap();
        registry.register("mocha", mocha()).unwrap();
        registry.prefer_pair("latte", "frappe");

        let err = registry.list_paired().unwrap_err();

        assert_eq!(
            err,
            ThemeError::UnknownTheme {
                name: "frappe".to_owned()
            }
        );
    }

    #[test]
    fn test_list_paired_preferred_wrong_variant_fails() {
        let mut registry = ThemeRegistry::new();
        registry.register("latte", latte()).unwrap();
        registry.register("mocha", mocha()).unwrap();
        registry.prefer_pair("mocha", "latte");

        let err = registry.list_paired().unwrap_err();

        assert!(matches!(err, ThemeError::MissingPair { .. }));
        assert!(err.to_string().contains("theme 'mocha' is dark, expected light"));
    }

    #[test]
    fn test_themes_keep_registration_order() {
        let mut registry = ThemeRegistry::new();
        registry.register("mocha", mocha()).unwrap();
        registry.register("latte", latte()).unwrap();

        let names: Vec<&str> = registry.themes().iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, vec!["mocha", "latte"]);
    }

    #[test]
    fn test_named_theme_serializes_flat() {
        let theme = NamedTheme {
            name: "mocha".to_owned(),
            definition: ThemeDefinition::file(ThemeVariant::Dark, "themes/mocha.json"),
        };

        let json = serde_json::to_value(&theme).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "mocha",
                "variant": "dark",
                "source": { "file": "themes/mocha.json" }
            })
        );
    }
}
