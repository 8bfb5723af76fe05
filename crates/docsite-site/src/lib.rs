//! Site descriptor composition for docsite.
//!
//! This crate provides:
//! - [`ThemeRegistry`]: named syntax-highlighting themes and the default light/dark pair
//! - [`NavTreeBuilder`]: ordered, nestable sidebar construction
//! - [`IntegrationSetBuilder`]: ordered, schema-validated build integrations
//! - [`Composer`]: merges everything into one immutable [`SiteDescriptor`]
//! - [`DescriptorLoader`]: runs all of the above from a loaded [`docsite_config::Config`]
//!
//! Every check that can fail is collected into a single [`CompositionError`],
//! so one run reports every defect of a configuration.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docsite_config::Config;
//! use docsite_site::DescriptorLoader;
//! use docsite_storage::FsStorage;
//!
//! let config = Config::load(Some(Path::new("docsite.toml")), None)?;
//! let storage = FsStorage::new(
//!     config.paths_resolved.root.clone(),
//!     config.paths_resolved.content_dir.clone(),
//! );
//! let descriptor = DescriptorLoader::new(&storage).load(&config)?;
//! println!("{}", descriptor.to_json()?);
//! # Ok(())
//! # }
//! ```

pub(crate) mod composer;
pub(crate) mod descriptor;
pub(crate) mod integration;
pub(crate) mod loader;
pub(crate) mod navigation;
mod schema;
pub(crate) mod theme;

pub use composer::{Composer, CompositionError, Defect};
pub use descriptor::{Highlight, Logo, SiteDescriptor, SiteMetadata, SocialLinks};
pub use integration::{
    AssetRef, IntegrationError, IntegrationSet, IntegrationSetBuilder, IntegrationSpec,
};
pub use loader::DescriptorLoader;
pub use navigation::{NavEntry, NavError, NavTree, NavTreeBuilder};
pub use schema::{IntegrationSchema, OptionKind, OptionRule, SchemaRegistry};
pub use theme::{NamedTheme, ThemeDefinition, ThemeError, ThemePair, ThemeRegistry};

// Re-export declaration types shared with docsite-config for convenience
pub use docsite_config::{OptionValue, ThemeSource, ThemeVariant};
