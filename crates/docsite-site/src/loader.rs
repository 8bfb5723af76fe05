//! Descriptor loading from declarations.
//!
//! [`DescriptorLoader`] feeds a loaded [`Config`] through the theme registry,
//! navigation builder and integration assembler, then composes the result.
//! Defects from every stage are reported together.

use docsite_config::{Config, ConfigError, IntegrationConfig, SidebarEntryConfig, SidebarTarget};
use docsite_storage::Storage;

use crate::composer::{Composer, CompositionError, Defect};
use crate::descriptor::{Logo, SiteDescriptor, SiteMetadata};
use crate::integration::{IntegrationSet, IntegrationSetBuilder, IntegrationSpec};
use crate::navigation::{NavError, NavTree, NavTreeBuilder};
use crate::schema::SchemaRegistry;
use crate::theme::{ThemeDefinition, ThemeRegistry};

/// Builds a [`SiteDescriptor`] from declarations.
pub struct DescriptorLoader<'a> {
    storage: &'a dyn Storage,
    schemas: SchemaRegistry,
}

impl<'a> DescriptorLoader<'a> {
    /// Create a loader using the built-in integration schemas.
    #[must_use]
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self {
            storage,
            schemas: SchemaRegistry::builtin(),
        }
    }

    /// Replace the integration schemas.
    #[must_use]
    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    /// Load and compose the site descriptor.
    ///
    /// A declaration that fails its own stage is left out of the result, and
    /// every other declaration is still checked.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] with every defect found in any stage.
    pub fn load(&self, config: &Config) -> Result<SiteDescriptor, CompositionError> {
        let mut defects = Vec::new();

        let metadata = Self::metadata(config);
        let themes = Self::themes(config, &mut defects);
        let navigation = self.navigation(&config.sidebar, &mut defects);
        let integrations = self.integrations(&config.integrations, &mut defects);

        let composer = Composer::new(self.storage);
        if defects.is_empty()
            && let Some(navigation) = navigation
        {
            return composer.compose(
                metadata,
                config.social.clone(),
                navigation,
                integrations,
                &themes,
            );
        }

        // Sidebar labels and links were checked while building.
        composer.check_metadata(&metadata, &mut defects);
        Composer::check_social(&config.social, &mut defects);
        composer.check_integrations(&integrations, &mut defects);
        composer.check_themes(&themes, &mut defects);
        tracing::debug!(defects = defects.len(), "Site composition failed");
        Err(CompositionError::new(defects))
    }

    fn metadata(config: &Config) -> SiteMetadata {
        SiteMetadata {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            logo: config.site.logo.as_ref().map(|logo| Logo {
                light: logo.light.clone(),
                dark: logo.dark.clone(),
                alt: logo.alt.clone(),
                replaces_title: logo.replaces_title,
            }),
        }
    }

    fn themes(config: &Config, defects: &mut Vec<Defect>) -> ThemeRegistry {
        let mut registry = ThemeRegistry::new();
        for theme in &config.highlight.themes {
            let definition = ThemeDefinition {
                variant: theme.variant,
                source: theme.source.clone(),
            };
            if let Err(e) = registry.register(&theme.name, definition) {
                defects.push(e.into());
            }
        }
        if let (Some(light), Some(dark)) = (&config.highlight.light, &config.highlight.dark) {
            registry.prefer_pair(light, dark);
        }
        registry
    }

    fn navigation(
        &self,
        sidebar: &[SidebarEntryConfig],
        defects: &mut Vec<Defect>,
    ) -> Option<NavTree> {
        Self::build_nav(NavTreeBuilder::new(self.storage), sidebar, "sidebar", defects)
    }

    /// Build one level of the sidebar, recursing into nested groups.
    ///
    /// Entries with defects are skipped. Returns `None` if nothing at this
    /// level could be built.
    fn build_nav(
        mut builder: NavTreeBuilder<'a>,
        entries: &[SidebarEntryConfig],
        field: &str,
        defects: &mut Vec<Defect>,
    ) -> Option<NavTree> {
        for (i, entry) in entries.iter().enumerate() {
            let entry_field = format!("{field}[{i}]");
            Composer::check_nav_label(&entry.label, &entry_field, defects);
            match entry.target() {
                Ok(SidebarTarget::Link(link)) => {
                    Composer::check_nav_link(link, &entry_field, defects);
                    builder.add_link(&entry.label, link);
                }
                Ok(SidebarTarget::Autogenerate(directory)) => {
                    if let Err(e) =
                        builder.add_autogen_group(&entry.label, directory, entry.collapsed)
                    {
                        defects.push(e.into());
                    }
                }
                Ok(SidebarTarget::Items([])) => {
                    defects.push(
                        NavError::EmptyGroup {
                            label: entry.label.clone(),
                        }
                        .into(),
                    );
                }
                Ok(SidebarTarget::Items(items)) => {
                    let child = builder.child();
                    let items_field = format!("{entry_field}.items");
                    if let Some(tree) = Self::build_nav(child, items, &items_field, defects) {
                        builder.add_group(&entry.label, entry.collapsed, tree);
                    }
                }
                Err(ConfigError::Validation(message)) => {
                    defects.push(Defect::InvalidDeclaration {
                        field: entry_field,
                        message,
                    });
                }
                Err(e) => defects.push(Defect::InvalidDeclaration {
                    field: entry_field,
                    message: e.to_string(),
                }),
            }
        }

        // Every declared entry failed and has been reported already.
        if builder.is_empty() && !entries.is_empty() {
            return None;
        }
        match builder.build() {
            Ok(tree) => Some(tree),
            Err(e) => {
                defects.push(e.into());
                None
            }
        }
    }

    /// Assemble integrations, placing required ones first in declared order.
    ///
    /// Specs with invalid options are left out of the returned set.
    fn integrations(
        &self,
        declared: &[IntegrationConfig],
        defects: &mut Vec<Defect>,
    ) -> IntegrationSet {
        let mut builder = IntegrationSetBuilder::with_schemas(self.schemas.clone());

        for integration in declared.iter().filter(|i| !i.required) {
            if let Err(e) = builder.append(spec(integration)) {
                defects.push(e.into());
            }
        }
        for integration in declared.iter().rev().filter(|i| i.required) {
            match builder.prepend_required(spec(integration)) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(
                        integration = %integration.name,
                        "Required integration already present"
                    );
                }
                Err(e) => defects.push(e.into()),
            }
        }

        let (set, errors) = builder.assemble();
        defects.extend(errors.into_iter().map(Defect::from));
        set
    }
}

fn spec(integration: &IntegrationConfig) -> IntegrationSpec {
    IntegrationSpec {
        name: integration.name.clone(),
        options: integration.options.clone(),
    }
}
