//! Option schemas for build integrations.
//!
//! Each known integration name has an [`IntegrationSchema`] listing the
//! options it accepts, their types, which ones are required, which ones name
//! project assets, and which integrations it must run after. Integrations
//! without a schema accept any options.

use std::collections::HashMap;

use docsite_config::OptionValue;

use crate::integration::{AssetRef, IntegrationError, IntegrationSpec};

/// Expected type of an option value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// Boolean flag.
    Bool,
    /// Integer value.
    Integer,
    /// String value.
    String,
    /// List whose items are all strings.
    StringList,
    /// List of any values.
    List,
}

impl OptionKind {
    /// Name of the kind for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::String => "string",
            Self::StringList => "list of strings",
            Self::List => "list",
        }
    }

    /// Whether `value` has this kind.
    #[must_use]
    pub fn matches(self, value: &OptionValue) -> bool {
        match (self, value) {
            (Self::Bool, OptionValue::Bool(_))
            | (Self::Integer, OptionValue::Integer(_))
            | (Self::String, OptionValue::String(_))
            | (Self::List, OptionValue::List(_)) => true,
            (Self::StringList, OptionValue::List(items)) => items
                .iter()
                .all(|item| matches!(item, OptionValue::String(_))),
            _ => false,
        }
    }
}

/// Rule for a single option.
#[derive(Clone, Debug)]
pub struct OptionRule {
    /// Option name (ignored for extra-option rules).
    pub name: &'static str,
    /// Expected type.
    pub kind: OptionKind,
    /// Whether the option must be present.
    pub required: bool,
    /// Whether string values name assets relative to the project root.
    pub asset: bool,
}

impl OptionRule {
    /// Optional option of the given kind.
    #[must_use]
    pub fn optional(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            asset: false,
        }
    }

    /// Required option of the given kind.
    #[must_use]
    pub fn required(name: &'static str, kind: OptionKind) -> Self {
        Self {
            required: true,
            ..Self::optional(name, kind)
        }
    }

    /// Mark string values as asset paths.
    #[must_use]
    pub fn asset(mut self) -> Self {
        self.asset = true;
        self
    }
}

/// Schema for one integration name.
#[derive(Clone, Debug)]
pub struct IntegrationSchema {
    /// Integration name.
    pub name: &'static str,
    /// Declared options.
    pub options: Vec<OptionRule>,
    /// Rule for options not listed in `options`; `None` rejects them.
    pub extra: Option<OptionRule>,
    /// Integrations that must come earlier when present.
    pub after: Vec<&'static str>,
}

impl IntegrationSchema {
    /// Schema with no options.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            options: Vec::new(),
            extra: None,
            after: Vec::new(),
        }
    }

    /// Add an option rule.
    #[must_use]
    pub fn option(mut self, rule: OptionRule) -> Self {
        self.options.push(rule);
        self
    }

    /// Accept unlisted options matching `rule`.
    #[must_use]
    pub fn extra(mut self, rule: OptionRule) -> Self {
        self.extra = Some(rule);
        self
    }

    /// Require `name` to come earlier when both are present.
    #[must_use]
    pub fn after(mut self, name: &'static str) -> Self {
        self.after.push(name);
        self
    }

    fn rule(&self, option: &str) -> Option<&OptionRule> {
        self.options
            .iter()
            .find(|rule| rule.name == option)
            .or(self.extra.as_ref())
    }

    /// Check a spec's options against this schema.
    pub(crate) fn validate(&self, spec: &IntegrationSpec) -> Result<(), IntegrationError> {
        for (option, value) in &spec.options {
            let rule = self
                .rule(option)
                .ok_or_else(|| IntegrationError::UnknownOption {
                    integration: spec.name.clone(),
                    option: option.clone(),
                })?;
            if !rule.kind.matches(value) {
                return Err(IntegrationError::InvalidOptionType {
                    integration: spec.name.clone(),
                    option: option.clone(),
                    expected: rule.kind.name(),
                    found: value.type_name(),
                });
            }
        }

        if let Some(missing) = self
            .options
            .iter()
            .find(|rule| rule.required && !spec.options.contains_key(rule.name))
        {
            return Err(IntegrationError::MissingOption {
                integration: spec.name.clone(),
                option: missing.name.to_owned(),
            });
        }

        Ok(())
    }

    /// Asset paths referenced by a spec's options.
    pub(crate) fn asset_refs(&self, spec: &IntegrationSpec) -> Vec<AssetRef> {
        let mut refs = Vec::new();
        for (option, value) in &spec.options {
            if !self.rule(option).is_some_and(|rule| rule.asset) {
                continue;
            }
            let paths: Vec<&str> = match value {
                OptionValue::String(path) => vec![path.as_str()],
                OptionValue::List(items) => items
                    .iter()
                    .filter_map(|item| match item {
                        OptionValue::String(path) => Some(path.as_str()),
                        _ => None,
                    })
                    .collect(),
                OptionValue::Bool(_) | OptionValue::Integer(_) => Vec::new(),
            };
            refs.extend(paths.into_iter().map(|path| AssetRef {
                integration: spec.name.clone(),
                option: option.clone(),
                path: path.to_owned(),
            }));
        }
        refs
    }
}

/// Schemas by integration name.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, IntegrationSchema>,
}

impl SchemaRegistry {
    /// Registry with no schemas; every integration accepts any options.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with schemas for the built-in integrations.
    ///
    /// - `mdx`, `markdoc`: markdown extensions
    /// - `tailwind`: scans markdown output, so runs after `mdx` and `markdoc`
    /// - `expressive-code`: code block rendering plugins
    /// - `custom-css`: stylesheet files
    /// - `components`: component overrides, each value a source file
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(
            IntegrationSchema::new("mdx")
                .option(OptionRule::optional("optimize", OptionKind::Bool)),
        );
        registry.register(
            IntegrationSchema::new("markdoc")
                .option(OptionRule::optional("allow_html", OptionKind::Bool)),
        );
        registry.register(
            IntegrationSchema::new("tailwind")
                .option(OptionRule::optional("apply_base_styles", OptionKind::Bool))
                .option(OptionRule::optional("nesting", OptionKind::Bool))
                .after("mdx")
                .after("markdoc"),
        );
        registry.register(
            IntegrationSchema::new("expressive-code")
                .option(OptionRule::optional("plugins", OptionKind::StringList)),
        );
        registry.register(
            IntegrationSchema::new("custom-css")
                .option(OptionRule::required("files", OptionKind::StringList).asset()),
        );
        registry.register(
            IntegrationSchema::new("components")
                .extra(OptionRule::optional("*", OptionKind::String).asset()),
        );
        registry
    }

    /// Register or replace a schema.
    pub fn register(&mut self, schema: IntegrationSchema) {
        self.schemas.insert(schema.name, schema);
    }

    /// Schema for an integration name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IntegrationSchema> {
        self.schemas.get(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_option_kind_matches() {
        assert!(OptionKind::Bool.matches(&OptionValue::Bool(true)));
        assert!(!OptionKind::Bool.matches(&OptionValue::from("true")));
        assert!(OptionKind::StringList.matches(&OptionValue::List(vec![])));
        assert!(OptionKind::StringList.matches(&OptionValue::List(vec![OptionValue::from("a")])));
        assert!(
            !OptionKind::StringList.matches(&OptionValue::List(vec![OptionValue::from(1_i64)]))
        );
        assert!(OptionKind::List.matches(&OptionValue::List(vec![OptionValue::from(1_i64)])));
    }

    #[test]
    fn test_validate_accepts_known_option() {
        let registry = SchemaRegistry::builtin();
        let spec = IntegrationSpec::new("tailwind").with_option("apply_base_styles", true);

        assert!(registry.get("tailwind").unwrap().validate(&spec).is_ok());
    }

    #[test]
    fn test_validate_unknown_option() {
        let registry = SchemaRegistry::builtin();
        let spec = IntegrationSpec::new("tailwind").with_option("purge", true);

        let err = registry.get("tailwind").unwrap().validate(&spec).unwrap_err();

        assert_eq!(
            err,
            IntegrationError::UnknownOption {
                integration: "tailwind".to_owned(),
                option: "purge".to_owned(),
            }
        );
    }

    #[test]
    fn test_validate_wrong_type() {
        let registry = SchemaRegistry::builtin();
        let spec = IntegrationSpec::new("tailwind").with_option("apply_base_styles", "yes");

        let err = registry.get("tailwind").unwrap().validate(&spec).unwrap_err();

        assert_eq!(
            err,
            IntegrationError::InvalidOptionType {
                integration: "tailwind".to_owned(),
                option: "apply_base_styles".to_owned(),
                expected: "bool",
                found: "string",
            }
        );
    }

    #[test]
    fn test_validate_missing_required() {
        let registry = SchemaRegistry::builtin();
        let spec = IntegrationSpec::new("custom-css");

        let err = registry.get("custom-css").unwrap().validate(&spec).unwrap_err();

        assert!(matches!(err, IntegrationError::MissingOption { .. }));
        assert!(err.to_string().contains("files"));
    }

    #[test]
    fn test_extra_rule_accepts_any_name() {
        let registry = SchemaRegistry::builtin();
        let spec = IntegrationSpec::new("components")
            .with_option("ThemeProvider", "./src/components/CustomThemeProvider.astro");

        assert!(registry.get("components").unwrap().validate(&spec).is_ok());
    }

    #[test]
    fn test_asset_refs_from_list_and_extra() {
        let registry = SchemaRegistry::builtin();
        let css = IntegrationSpec::new("custom-css").with_option(
            "files",
            OptionValue::List(vec![
                OptionValue::from("./src/tailwind.css"),
                OptionValue::from("./src/extra.css"),
            ]),
        );
        let components = IntegrationSpec::new("components")
            .with_option("ThemeProvider", "./src/components/CustomThemeProvider.astro");

        let css_refs = registry.get("custom-css").unwrap().asset_refs(&css);
        let component_refs = registry.get("components").unwrap().asset_refs(&components);

        let paths: Vec<&str> = css_refs.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["./src/tailwind.css", "./src/extra.css"]);
        assert_eq!(component_refs[0].option, "ThemeProvider");
    }

    #[test]
    fn test_non_asset_options_have_no_refs() {
        let registry = SchemaRegistry::builtin();
        let spec = IntegrationSpec::new("expressive-code")
            .with_option("plugins", OptionValue::List(vec![OptionValue::from("line-numbers")]));

        assert!(registry.get("expressive-code").unwrap().asset_refs(&spec).is_empty());
    }

    #[test]
    fn test_unregistered_integration_has_no_schema() {
        assert!(SchemaRegistry::builtin().get("sitemap").is_none());
    }
}
