//! CLI command implementations.

mod check;
mod dump;
mod sidebar;

use std::path::PathBuf;

use clap::Args;
use docsite_config::{CliSettings, Config};
use docsite_site::{DescriptorLoader, SiteDescriptor};
use docsite_storage::FsStorage;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use dump::DumpArgs;
pub(crate) use sidebar::SidebarArgs;

/// Arguments shared by every command that loads a project.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover docsite.toml).
    #[arg(short, long, env = "DOCSITE_CONFIG")]
    config: Option<PathBuf>,

    /// Project root for assets and theme files (overrides config).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Content directory for autogenerated sidebar groups (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ProjectArgs {
    /// Load the configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            root: self.root.clone(),
            content_dir: self.content_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::info!(
            config = ?config.config_path,
            root = %config.paths_resolved.root.display(),
            content_dir = %config.paths_resolved.content_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load the configuration and compose the site descriptor.
    pub(crate) fn compose(&self) -> Result<(Config, SiteDescriptor), CliError> {
        let config = self.load_config()?;
        let storage = FsStorage::new(
            config.paths_resolved.root.clone(),
            config.paths_resolved.content_dir.clone(),
        );
        let descriptor = DescriptorLoader::new(&storage).load(&config)?;
        Ok((config, descriptor))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const DOCSITE_TOML: &str = r#"
[site]
title = "NodeKit"

[site.logo]
light = "./public/nodekit-light.png"
dark = "./public/nodekit-dark.png"
alt = "NodeKit for Algorand"
replaces_title = true

[social]
github = "https://github.com/algorandfoundation/nodekit"

[[sidebar]]
label = "Guides"
autogenerate = { directory = "guides" }

[[sidebar]]
label = "Troubleshooting"
link = "/troubleshooting"

[[integrations]]
name = "custom-css"
options = { files = ["./src/tailwind.css"] }

[[highlight.themes]]
name = "latte"
variant = "light"
source = { bundled = "catppuccin-latte" }

[[highlight.themes]]
name = "mocha"
variant = "dark"
source = { file = "themes/mocha.json" }
"#;

    fn write(root: &Path, path: &str, content: &str) {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "docsite.toml", DOCSITE_TOML);
        write(dir.path(), "public/nodekit-light.png", "");
        write(dir.path(), "public/nodekit-dark.png", "");
        write(dir.path(), "src/tailwind.css", "@tailwind base;");
        write(dir.path(), "themes/mocha.json", r#"{"name":"Mocha","type":"dark"}"#);
        write(dir.path(), "src/content/docs/guides/install.md", "# Install");
        dir
    }

    fn args(dir: &TempDir) -> ProjectArgs {
        ProjectArgs {
            config: Some(dir.path().join("docsite.toml")),
            root: None,
            content_dir: None,
            verbose: false,
        }
    }

    #[test]
    fn test_compose_project() {
        let dir = project();

        let (config, descriptor) = args(&dir).compose().unwrap();

        assert_eq!(config.paths_resolved.root, dir.path());
        assert_eq!(descriptor.metadata().title, "NodeKit");
        assert_eq!(descriptor.navigation().len(), 2);
    }

    #[test]
    fn test_compose_reports_defects() {
        let dir = project();
        fs::remove_file(dir.path().join("src/tailwind.css")).unwrap();
        fs::remove_dir_all(dir.path().join("src/content/docs/guides")).unwrap();

        let err = args(&dir).compose().unwrap_err();

        let CliError::Composition(err) = err else {
            panic!("Expected composition error, got {err:?}");
        };
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_content_dir_override() {
        let dir = project();
        write(dir.path(), "docs/guides/intro.md", "# Intro");
        fs::remove_dir_all(dir.path().join("src/content/docs")).unwrap();
        let mut args = args(&dir);
        args.content_dir = Some(dir.path().join("docs"));

        let (_, descriptor) = args.compose().unwrap();

        assert_eq!(descriptor.navigation().len(), 2);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let args = ProjectArgs {
            config: Some(dir.path().join("docsite.toml")),
            root: None,
            content_dir: None,
            verbose: false,
        };

        let err = args.compose().unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
    }
}
