//! Component definitions.
//!
//! A [`ComponentDefinition`] bundles what a component needs to turn caller
//! supplied property values into classes: its property [`Schema`], its
//! [`StyleClassMap`] and the classes it always carries.
//!
//! Definitions are immutable once built and are usually kept in a
//! `once_cell::sync::Lazy` static, one per component. Components that build
//! on another one [`extend`](ComponentDefinition::extend) its definition:
//! the child's properties replace the parent's by name.

use responsive_props::{normalize, validate, NormalizeOptions, Schema, ValueError, Values};
use responsive_style::{apply_values_to_style_map, AppliedStyles, StyleClassMap};

use crate::error::ComponentError;

/// Schema and style-class map of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDefinition {
    name: String,
    schema: Schema,
    style_class_map: StyleClassMap,
    base_classes: Vec<String>,
}

impl ComponentDefinition {
    /// Creates a definition without classes.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            style_class_map: StyleClassMap::new(),
            base_classes: Vec::new(),
        }
    }

    /// Loads a definition from a YAML schema and a YAML style-class map.
    ///
    /// The style-class map is used as declared; derive breakpoint classes
    /// with [`StyleClassMap::add_responsive_variants`] and
    /// [`with_style_class_map`](Self::with_style_class_map) when needed.
    pub fn from_yaml(
        name: impl Into<String>,
        schema: &str,
        style_class_map: &str,
    ) -> Result<Self, ComponentError> {
        let schema = Schema::from_yaml(schema)?;
        let style_class_map = StyleClassMap::from_yaml(style_class_map)?;
        Ok(Self::new(name, schema).with_style_class_map(style_class_map))
    }

    /// Derives a child definition: `overrides` replaces properties of the
    /// same name, everything else is inherited.
    pub fn extend(&self, name: impl Into<String>, overrides: &Schema) -> Self {
        Self {
            name: name.into(),
            schema: self.schema.merge(overrides),
            style_class_map: self.style_class_map.clone(),
            base_classes: self.base_classes.clone(),
        }
    }

    /// Replaces the style-class map.
    pub fn with_style_class_map(mut self, style_class_map: StyleClassMap) -> Self {
        self.style_class_map = style_class_map;
        self
    }

    /// Merges more classes on top of the current style-class map.
    pub fn merge_style_class_map(mut self, style_class_map: &StyleClassMap) -> Self {
        self.style_class_map = self.style_class_map.merge(style_class_map);
        self
    }

    /// Adds a class the component always carries.
    pub fn with_base_class(mut self, class: impl Into<String>) -> Self {
        self.base_classes.push(class.into());
        self
    }

    /// Display name, used to prefix errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn style_class_map(&self) -> &StyleClassMap {
        &self.style_class_map
    }

    /// Classes emitted before the resolved ones.
    pub fn base_classes(&self) -> &[String] {
        &self.base_classes
    }

    /// Normalizes `values` against the schema.
    pub fn normalize(&self, values: Values, options: NormalizeOptions) -> Values {
        normalize(&self.schema, values, options)
    }

    /// Validates `values` against the schema.
    pub fn validate(&self, values: &Values) -> Result<(), ValueError> {
        validate(&self.schema, values)
    }

    /// Resolves the classes of already normalized `values`.
    pub fn apply_style_map(&self, values: &Values) -> AppliedStyles {
        apply_values_to_style_map(&self.style_class_map, values)
    }

    /// Normalizes `values` (falling back to defaults) and returns the
    /// component's class attribute: base classes first, then resolved
    /// classes.
    pub fn class_list(&self, values: Values) -> String {
        let normalized = self.normalize(values, NormalizeOptions::default());
        let applied = self.apply_style_map(&normalized);

        self.base_classes
            .iter()
            .map(String::as_str)
            .chain(applied.classes())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Like [`class_list`](Self::class_list), but rejects invalid values
    /// instead of replacing them with defaults.
    pub fn try_class_list(&self, values: Values) -> Result<String, ComponentError> {
        self.validate(&values).map_err(|source| ComponentError::Value {
            component: self.name.clone(),
            source,
        })?;
        log::trace!("{}: values validated", self.name);
        Ok(self.class_list(values))
    }
}
