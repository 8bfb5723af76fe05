//! Build integration set assembly.
//!
//! Integrations run in list order; a later integration may depend on side
//! effects of an earlier one. Options are checked against the integration's
//! [`IntegrationSchema`](crate::IntegrationSchema) as soon as a spec is added.

use std::collections::{BTreeMap, HashMap};

use docsite_config::OptionValue;
use serde::Serialize;

use crate::schema::SchemaRegistry;

/// A named integration with its options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IntegrationSpec {
    /// Integration name.
    pub name: String,
    /// Options by name.
    pub options: BTreeMap<String, OptionValue>,
}

impl IntegrationSpec {
    /// Create a spec with no options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    /// Set an option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}

/// Asset path referenced by an integration option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRef {
    /// Integration name.
    pub integration: String,
    /// Option name.
    pub option: String,
    /// Asset path relative to the project root.
    pub path: String,
}

/// Finalized, ordered integration list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IntegrationSet {
    specs: Vec<IntegrationSpec>,
    #[serde(skip)]
    assets: Vec<AssetRef>,
}

impl IntegrationSet {
    /// Specs in processing order.
    #[must_use]
    pub fn specs(&self) -> &[IntegrationSpec] {
        &self.specs
    }

    /// Get a spec by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IntegrationSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Integration names in processing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    /// Asset paths referenced by options.
    #[must_use]
    pub fn assets(&self) -> &[AssetRef] {
        &self.assets
    }

    /// Number of integrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Integration error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntegrationError {
    /// Two specs with the same name disagree on an option.
    #[error(
        "integration '{integration}' is declared twice with conflicting values \
         for '{option}': {first} vs {second}"
    )]
    ConflictingOptions {
        /// Integration name.
        integration: String,
        /// Option name.
        option: String,
        /// Value from the earlier spec.
        first: OptionValue,
        /// Value from the later spec.
        second: OptionValue,
    },
    /// Option not accepted by the integration's schema.
    #[error("integration '{integration}' does not accept option '{option}'")]
    UnknownOption {
        /// Integration name.
        integration: String,
        /// Option name.
        option: String,
    },
    /// Option value has the wrong type.
    #[error("integration '{integration}' option '{option}' expects {expected}, got {found}")]
    InvalidOptionType {
        /// Integration name.
        integration: String,
        /// Option name.
        option: String,
        /// Expected type.
        expected: &'static str,
        /// Actual type.
        found: &'static str,
    },
    /// Required option is absent.
    #[error("integration '{integration}' requires option '{option}'")]
    MissingOption {
        /// Integration name.
        integration: String,
        /// Option name.
        option: String,
    },
    /// Integration is placed before one it must follow.
    #[error("integration '{integration}' must come after '{must_follow}'")]
    OrderingViolation {
        /// Integration name.
        integration: String,
        /// Integration that must come earlier.
        must_follow: String,
    },
}

/// Assembler for [`IntegrationSet`].
pub struct IntegrationSetBuilder {
    schemas: SchemaRegistry,
    specs: Vec<IntegrationSpec>,
}

impl Default for IntegrationSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegrationSetBuilder {
    /// Create a builder using the built-in schemas.
    #[must_use]
    pub fn new() -> Self {
        Self::with_schemas(SchemaRegistry::builtin())
    }

    /// Create a builder using custom schemas.
    #[must_use]
    pub fn with_schemas(schemas: SchemaRegistry) -> Self {
        Self {
            schemas,
            specs: Vec::new(),
        }
    }

    fn validate(&self, spec: &IntegrationSpec) -> Result<(), IntegrationError> {
        match self.schemas.get(&spec.name) {
            Some(schema) => schema.validate(spec),
            None => Ok(()),
        }
    }

    /// Append a spec at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the options don't match the integration's schema.
    /// Nothing is appended in that case.
    pub fn append(&mut self, spec: IntegrationSpec) -> Result<(), IntegrationError> {
        self.validate(&spec)?;
        tracing::debug!(integration = %spec.name, "Appended integration");
        self.specs.push(spec);
        Ok(())
    }

    /// Insert a mandatory spec at the front unless one with the same name exists.
    ///
    /// Returns `true` if the spec was inserted, `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the options don't match the integration's schema.
    pub fn prepend_required(&mut self, spec: IntegrationSpec) -> Result<bool, IntegrationError> {
        self.validate(&spec)?;
        if self.specs.iter().any(|existing| existing.name == spec.name) {
            return Ok(false);
        }
        tracing::debug!(integration = %spec.name, "Prepended required integration");
        self.specs.insert(0, spec);
        Ok(true)
    }

    /// Finalize the ordered set.
    ///
    /// Specs sharing a name are merged into the position of the first one.
    ///
    /// # Errors
    ///
    /// Returns every [`IntegrationError::ConflictingOptions`] (same-name specs
    /// setting one option to different values) and every
    /// [`IntegrationError::OrderingViolation`] (an integration preceding one
    /// its schema requires to come first).
    pub fn finalize(self) -> Result<IntegrationSet, Vec<IntegrationError>> {
        let (set, errors) = self.assemble();
        if errors.is_empty() {
            Ok(set)
        } else {
            Err(errors)
        }
    }

    /// Merge, order-check and collect asset references.
    ///
    /// Always returns the merged set; on conflicts the first value of an
    /// option is kept.
    pub(crate) fn assemble(self) -> (IntegrationSet, Vec<IntegrationError>) {
        let mut errors = Vec::new();
        let mut merged: Vec<IntegrationSpec> = Vec::with_capacity(self.specs.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for spec in self.specs {
            let Some(&pos) = positions.get(&spec.name) else {
                positions.insert(spec.name.clone(), merged.len());
                merged.push(spec);
                continue;
            };
            let target = &mut merged[pos];
            for (option, value) in spec.options {
                match target.options.get(&option) {
                    Some(existing) if *existing != value => {
                        errors.push(IntegrationError::ConflictingOptions {
                            integration: spec.name.clone(),
                            option,
                            first: existing.clone(),
                            second: value,
                        });
                    }
                    Some(_) => {}
                    None => {
                        target.options.insert(option, value);
                    }
                }
            }
        }

        for (pos, spec) in merged.iter().enumerate() {
            let Some(schema) = self.schemas.get(&spec.name) else {
                continue;
            };
            for &before in &schema.after {
                if positions.get(before).is_some_and(|&before_pos| before_pos > pos) {
                    errors.push(IntegrationError::OrderingViolation {
                        integration: spec.name.clone(),
                        must_follow: before.to_owned(),
                    });
                }
            }
        }

        let assets = merged
            .iter()
            .filter_map(|spec| {
                self.schemas
                    .get(&spec.name)
                    .map(|schema| schema.asset_refs(spec))
            })
            .flatten()
            .collect();

        (
            IntegrationSet {
                specs: merged,
                assets,
            },
            errors,
        )
    }
}
