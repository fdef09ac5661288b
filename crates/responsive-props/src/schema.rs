//! Property schemas.
//!
//! A [`Schema`] is the validated, immutable tree of property definitions of a
//! component. It is built from a [`RawSchema`], either declared in code with
//! the [`prop`] marker or parsed from YAML (where the marker is the `!prop`
//! tag).
//!
//! Entries flagged with [`prop`] become [`PropertyDefinition`]s. Any other
//! nested raw schema becomes a namespace whose properties are named by their
//! dotted path (`layout.gap`).
//!
//! ```rust
//! use responsive_props::{prop, PropertyParams, RawSchema, Responsive, Schema};
//!
//! let raw = RawSchema::new()
//!     .with("direction", prop(PropertyParams::new().allowed_values(["block", "inline"]).default("block")))
//!     .with(
//!         "layout",
//!         RawSchema::new().with("gap", prop(PropertyParams::new().allowed_values(["none", "normal"]).default("none"))),
//!     );
//!
//! let schema = Schema::build(&raw).unwrap();
//! assert_eq!(schema.property("layout.gap").unwrap().name(), "layout.gap");
//! ```
//!
//! Schemas are `Send + Sync` and meant to be built once and shared, e.g. in a
//! `once_cell::sync::Lazy` static.

use std::path::Path;

use indexmap::IndexMap;

use crate::breakpoint::Breakpoint;
use crate::definition::{PropertyDefinition, PropertyParams};
use crate::error::DefinitionError;
use crate::parser;

/// Node of a raw schema.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    /// Parameters of a property definition.
    Prop(PropertyParams),
    /// Nested namespace.
    Namespace(RawSchema),
}

impl From<RawSchema> for RawNode {
    fn from(schema: RawSchema) -> Self {
        RawNode::Namespace(schema)
    }
}

/// Marks property parameters as a property definition.
pub fn prop(params: PropertyParams) -> RawNode {
    RawNode::Prop(params)
}

/// Declared, not yet validated schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSchema {
    entries: IndexMap<String, RawNode>,
}

impl RawSchema {
    /// Creates an empty raw schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw schema from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, DefinitionError> {
        parser::parse_schema(yaml)
    }

    /// Adds an entry, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, node: impl Into<RawNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Adds an entry, replacing any of the same name.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<RawNode>) {
        self.entries.insert(name.into(), node.into());
    }

    pub fn get(&self, name: &str) -> Option<&RawNode> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawNode)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Node of a built schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Property(PropertyDefinition),
    Namespace(Schema),
}

impl SchemaNode {
    /// Returns the definition if this node is a property.
    pub fn as_property(&self) -> Option<&PropertyDefinition> {
        match self {
            SchemaNode::Property(def) => Some(def),
            SchemaNode::Namespace(_) => None,
        }
    }

    /// Returns the nested schema if this node is a namespace.
    pub fn as_namespace(&self) -> Option<&Schema> {
        match self {
            SchemaNode::Namespace(schema) => Some(schema),
            SchemaNode::Property(_) => None,
        }
    }
}

/// Validated, immutable tree of property definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: IndexMap<String, SchemaNode>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and validates every definition of `raw`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found, in declaration order.
    pub fn build(raw: &RawSchema) -> Result<Self, DefinitionError> {
        build_definitions(raw, None)
    }

    /// Parses and builds a schema from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, DefinitionError> {
        Self::build(&RawSchema::from_yaml(yaml)?)
    }

    /// Reads, parses and builds a schema from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionError::Load {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    /// Returns a schema with the entries of `overrides` applied on top of
    /// this one.
    ///
    /// Entries are replaced by top-level key; namespaces are not merged.
    pub fn merge(&self, overrides: &Schema) -> Schema {
        let mut entries = self.entries.clone();
        for (name, node) in &overrides.entries {
            entries.insert(name.clone(), node.clone());
        }
        Schema { entries }
    }

    /// Top-level node by name.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries.get(name)
    }

    /// Looks up a property by its dotted path.
    pub fn property(&self, path: &str) -> Option<&PropertyDefinition> {
        let (namespace, name) = match path.split_once('.') {
            Some((head, rest)) => (Some(head), rest),
            None => (None, path),
        };
        match namespace {
            Some(head) => self.get(head)?.as_namespace()?.property(name),
            None => self.get(name)?.as_property(),
        }
    }

    /// All property definitions, depth first in declaration order.
    pub fn properties(&self) -> Vec<&PropertyDefinition> {
        let mut out = Vec::new();
        self.collect_properties(&mut out);
        out
    }

    fn collect_properties<'a>(&'a self, out: &mut Vec<&'a PropertyDefinition>) {
        for node in self.entries.values() {
            match node {
                SchemaNode::Property(def) => out.push(def),
                SchemaNode::Namespace(nested) => nested.collect_properties(out),
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the definitions of `raw`, naming properties below `namespace`.
pub fn build_definitions(raw: &RawSchema, namespace: Option<&str>) -> Result<Schema, DefinitionError> {
    let mut entries = IndexMap::with_capacity(raw.len());

    for (name, node) in raw.iter() {
        let path = qualify(namespace, name);
        if Breakpoint::is_breakpoint_key(name) {
            return Err(DefinitionError::ReservedName { property: path });
        }

        let built = match node {
            RawNode::Prop(params) => SchemaNode::Property(PropertyDefinition::new(path, params.clone())?),
            RawNode::Namespace(nested) => SchemaNode::Namespace(build_definitions(nested, Some(&path))?),
        };
        entries.insert(name.clone(), built);
    }

    Ok(Schema { entries })
}

pub(crate) fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}.{}", ns, name),
        None => name.to_string(),
    }
}
