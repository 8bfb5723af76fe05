//! Configuration management for docsite.
//!
//! Parses `docsite.toml` declaration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The file declares every concern that is later composed into a site
//! descriptor: site metadata, social links, the sidebar, build-time
//! integrations and syntax-highlighting themes. This crate only loads and
//! shape-checks declarations; cross-reference checks (assets exist, theme
//! pair exists) belong to composition.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.logo.light`
//! - `site.logo.dark`
//! - `social.*`

mod diagnostics;
mod expand;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use diagnostics::{ConfigDiagnostic, ConfigDiagnostics};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override project root directory.
    pub root: Option<PathBuf>,
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsite.toml";

/// Content directory used when `paths.content_dir` is not set.
const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// Site declarations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Social links, keyed by platform name.
    pub social: BTreeMap<String, String>,
    /// Sidebar entries in display order.
    pub sidebar: Vec<SidebarEntryConfig>,
    /// Build-time integrations in processing order.
    pub integrations: Vec<IntegrationConfig>,
    /// Syntax-highlighting themes.
    pub highlight: HighlightConfig,
    /// Path configuration (relative strings from TOML).
    paths: PathsConfigRaw,

    /// Resolved path configuration (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Optional site description.
    pub description: Option<String>,
    /// Optional logo shown in the header.
    pub logo: Option<LogoConfig>,
}

/// Logo configuration with light and dark variants.
#[derive(Debug, Deserialize)]
pub struct LogoConfig {
    /// Logo used in light mode (relative to project root).
    pub light: String,
    /// Logo used in dark mode (relative to project root).
    pub dark: String,
    /// Alternative text.
    #[serde(default)]
    pub alt: String,
    /// Whether the logo replaces the title text.
    #[serde(default)]
    pub replaces_title: bool,
}

/// A single sidebar entry as declared in TOML.
///
/// Exactly one of `link`, `autogenerate` or `items` must be set.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct SidebarEntryConfig {
    /// Display label.
    pub label: String,
    /// Link target for explicit links.
    pub link: Option<String>,
    /// Content directory for autogenerated groups.
    pub autogenerate: Option<AutogenerateConfig>,
    /// Nested entries for explicit groups.
    pub items: Option<Vec<SidebarEntryConfig>>,
    /// Whether a group starts collapsed.
    #[serde(default)]
    pub collapsed: bool,
}

/// Autogenerated group source.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct AutogenerateConfig {
    /// Directory relative to the content root.
    pub directory: String,
}

/// What a sidebar entry points at.
#[derive(Debug, PartialEq, Eq)]
pub enum SidebarTarget<'a> {
    /// Explicit link.
    Link(&'a str),
    /// Group generated from a content directory.
    Autogenerate(&'a str),
    /// Explicit nested group.
    Items(&'a [SidebarEntryConfig]),
}

impl SidebarEntryConfig {
    /// Get the entry target.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` unless exactly one of `link`,
    /// `autogenerate` or `items` is set.
    pub fn target(&self) -> Result<SidebarTarget<'_>, ConfigError> {
        match (&self.link, &self.autogenerate, &self.items) {
            (Some(link), None, None) => Ok(SidebarTarget::Link(link)),
            (None, Some(auto), None) => Ok(SidebarTarget::Autogenerate(&auto.directory)),
            (None, None, Some(items)) => Ok(SidebarTarget::Items(items)),
            (None, None, None) => Err(ConfigError::Validation(format!(
                "sidebar entry '{}' needs one of link, autogenerate or items",
                self.label
            ))),
            _ => Err(ConfigError::Validation(format!(
                "sidebar entry '{}' sets more than one of link, autogenerate and items",
                self.label
            ))),
        }
    }
}

/// A build-time integration as declared in TOML.
#[derive(Debug, Deserialize)]
pub struct IntegrationConfig {
    /// Integration name.
    pub name: String,
    /// Integration options.
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
    /// Mandatory integrations are placed first, once.
    #[serde(default)]
    pub required: bool,
}

/// A single integration option value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// String value.
    String(String),
    /// List of values.
    List(Vec<OptionValue>),
}

impl OptionValue {
    /// Name of the value's type for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Syntax-highlighting configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Preferred light theme name.
    pub light: Option<String>,
    /// Preferred dark theme name.
    pub dark: Option<String>,
    /// Theme definitions in registration order.
    pub themes: Vec<ThemeConfig>,
}

/// A named theme definition.
#[derive(Debug, Deserialize)]
pub struct ThemeConfig {
    /// Theme name.
    pub name: String,
    /// Light or dark variant.
    pub variant: ThemeVariant,
    /// Where the theme comes from.
    pub source: ThemeSource,
}

/// Theme color mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// Light mode.
    Light,
    /// Dark mode.
    Dark,
}

impl ThemeVariant {
    /// Parse a variant name as used in theme files (`"light"` or `"dark"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// Theme source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    /// Theme bundled with the highlighting engine, by id.
    Bundled(String),
    /// Theme JSON file relative to the project root.
    File(String),
}

/// Raw path configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    root: Option<String>,
    content_dir: Option<String>,
}

/// Resolved path configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PathsConfig {
    /// Project root for assets and theme files.
    pub root: PathBuf,
    /// Content root for autogenerated sidebar groups.
    pub content_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Every shape error found while validating.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.title`").
        field: String,
        /// Error message (e.g., "${`DOCS_TITLE`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string with paths relative to `base`.
    ///
    /// Performs the same expansion, resolution and validation as [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(base);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.paths_resolved.root.clone_from(root);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.paths_resolved.content_dir.clone_from(content_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            social: BTreeMap::new(),
            sidebar: Vec::new(),
            integrations: Vec::new(),
            highlight: HighlightConfig::default(),
            paths: PathsConfigRaw::default(),
            paths_resolved: PathsConfig {
                root: base.to_path_buf(),
                content_dir: base.join(DEFAULT_CONTENT_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration shape.
    ///
    /// Checks that declarations are well-formed on their own. Whether they
    /// reference existing files is decided during composition.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Diagnostics` listing every shape error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.validate_site(&mut diag);
        Self::validate_sidebar(&self.sidebar, "sidebar", &mut diag);
        self.validate_integrations(&mut diag);
        self.validate_highlight(&mut diag);
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Validate site configuration.
    fn validate_site(&self, diag: &mut ConfigDiagnostics) {
        if let Some(logo) = &self.site.logo {
            diag.require_non_empty(&logo.light, "site.logo.light");
            diag.require_non_empty(&logo.dark, "site.logo.dark");
        }
    }

    /// Validate sidebar entries recursively.
    fn validate_sidebar(
        entries: &[SidebarEntryConfig],
        field: &str,
        diag: &mut ConfigDiagnostics,
    ) {
        for (i, entry) in entries.iter().enumerate() {
            let entry_field = format!("{field}[{i}]");
            diag.require_non_empty(&entry.label, format!("{entry_field}.label"));
            match entry.target() {
                Ok(SidebarTarget::Link(link)) => {
                    diag.require_non_empty(link, format!("{entry_field}.link"));
                }
                Ok(SidebarTarget::Autogenerate(directory)) => {
                    diag.require_non_empty(
                        directory,
                        format!("{entry_field}.autogenerate.directory"),
                    );
                }
                Ok(SidebarTarget::Items(items)) => {
                    Self::validate_sidebar(items, &format!("{entry_field}.items"), diag);
                }
                Err(ConfigError::Validation(message)) => diag.error(entry_field, message),
                Err(e) => diag.error(entry_field, e.to_string()),
            }
        }
    }

    /// Validate integration declarations.
    fn validate_integrations(&self, diag: &mut ConfigDiagnostics) {
        for (i, integration) in self.integrations.iter().enumerate() {
            diag.require_non_empty(&integration.name, format!("integrations[{i}].name"));
        }
    }

    /// Validate highlighting configuration.
    fn validate_highlight(&self, diag: &mut ConfigDiagnostics) {
        for (i, theme) in self.highlight.themes.iter().enumerate() {
            diag.require_non_empty(&theme.name, format!("highlight.themes[{i}].name"));
            let source = match &theme.source {
                ThemeSource::Bundled(id) | ThemeSource::File(id) => id,
            };
            diag.require_non_empty(source, format!("highlight.themes[{i}].source"));
        }
        if self.highlight.light.is_some() != self.highlight.dark.is_some() {
            diag.error("highlight", "highlight.light and highlight.dark must be set together");
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;

        if let Some(ref mut logo) = self.site.logo {
            logo.light = expand::expand_env(&logo.light, "site.logo.light")?;
            logo.dark = expand::expand_env(&logo.dark, "site.logo.dark")?;
        }

        for (platform, url) in &mut self.social {
            *url = expand::expand_env(url, &format!("social.{platform}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let root = match self.paths.root.as_deref() {
            Some(root) => config_dir.join(root),
            None => config_dir.to_path_buf(),
        };
        let content_dir = root.join(
            self.paths
                .content_dir
                .as_deref()
                .unwrap_or(DEFAULT_CONTENT_DIR),
        );
        self.paths_resolved = PathsConfig { root, content_dir };
    }
}
