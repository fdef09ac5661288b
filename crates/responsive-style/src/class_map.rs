//! Style-class maps.
//!
//! A [`StyleClassMap`] maps property values to CSS class names. It mirrors
//! the shape of a values tree: each property maps its possible values to a
//! class, boolean switches map directly to a single class, and nested maps
//! follow nested values.
//!
//! Breakpoint sub-maps (`whenNarrow`, `whenRegular`, `whenWide`) hold the
//! classes used when a value applies to a single breakpoint. They are usually
//! derived with [`StyleClassMap::add_responsive_variants`], which suffixes
//! every class with the breakpoint modifier.
//!
//! # YAML Format
//!
//! ```yaml
//! direction:
//!   inline: Stack--dir-inline
//!   block: Stack--dir-block
//! show_dividers: Stack--showDividers
//!
//! # explicit breakpoint classes
//! whenNarrow:
//!   direction:
//!     inline: Stack--dir-inline-whenNarrow
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use responsive_props::{Breakpoint, MapKey};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StyleMapError;

/// Property (or value) name to class entry.
pub type ClassMap = IndexMap<String, ClassEntry>;

/// Leaf or branch of a style-class map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassEntry {
    /// A class name.
    Class(String),
    /// Classes keyed by value, or by nested property.
    Map(ClassMap),
}

impl ClassEntry {
    /// Creates a class leaf.
    pub fn class(name: impl Into<String>) -> Self {
        ClassEntry::Class(name.into())
    }

    /// Creates a map entry from `(key, class)` pairs.
    pub fn classes<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ClassEntry>,
    {
        ClassEntry::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the class name of a leaf.
    pub fn as_class(&self) -> Option<&str> {
        match self {
            ClassEntry::Class(name) => Some(name),
            ClassEntry::Map(_) => None,
        }
    }

    /// Returns the nested entries of a branch.
    pub fn as_map(&self) -> Option<&ClassMap> {
        match self {
            ClassEntry::Map(map) => Some(map),
            ClassEntry::Class(_) => None,
        }
    }

    /// Derives the entry used for a breakpoint: every class suffixed with
    /// `-<modifier>`.
    pub fn with_modifier(&self, modifier: &str) -> ClassEntry {
        match self {
            ClassEntry::Class(name) => ClassEntry::Class(format!("{}-{}", name, modifier)),
            ClassEntry::Map(map) => ClassEntry::Map(
                map.iter()
                    .map(|(key, entry)| (key.clone(), entry.with_modifier(modifier)))
                    .collect(),
            ),
        }
    }

    /// Deep merge: maps are merged key by key, anything else is replaced.
    fn merge(&mut self, other: &ClassEntry) {
        match (self, other) {
            (ClassEntry::Map(base), ClassEntry::Map(overrides)) => merge_class_maps(base, overrides),
            (this, other) => *this = other.clone(),
        }
    }
}

// Scalar keys (`2: Grid--cols-2`) are read as their string form.
impl<'de> Deserialize<'de> for ClassEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClassEntryVisitor;

        impl<'de> Visitor<'de> for ClassEntryVisitor {
            type Value = ClassEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a class name or a map of classes")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ClassEntry, E> {
                Ok(ClassEntry::Class(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ClassEntry, E> {
                Ok(ClassEntry::Class(v))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ClassEntry, A::Error> {
                let mut map = ClassMap::new();
                while let Some(MapKey(key)) = access.next_key()? {
                    map.insert(key, access.next_value()?);
                }
                Ok(ClassEntry::Map(map))
            }
        }

        deserializer.deserialize_any(ClassEntryVisitor)
    }
}

impl From<&str> for ClassEntry {
    fn from(name: &str) -> Self {
        ClassEntry::Class(name.to_string())
    }
}

impl From<String> for ClassEntry {
    fn from(name: String) -> Self {
        ClassEntry::Class(name)
    }
}

impl From<ClassMap> for ClassEntry {
    fn from(map: ClassMap) -> Self {
        ClassEntry::Map(map)
    }
}

fn merge_class_maps(base: &mut ClassMap, overrides: &ClassMap) {
    for (key, entry) in overrides {
        match base.get_mut(key) {
            Some(existing) => existing.merge(entry),
            None => {
                base.insert(key.clone(), entry.clone());
            }
        }
    }
}

/// Maps property values to CSS classes, per breakpoint.
///
/// Built once and reused; applying it never mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleClassMap {
    base: ClassMap,
    breakpoints: BTreeMap<Breakpoint, ClassMap>,
}

impl StyleClassMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a style-class map from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, StyleMapError> {
        let mut map = StyleClassMap::new();
        if yaml.trim().is_empty() {
            return Ok(map);
        }
        let raw: ClassMap = serde_yaml::from_str(yaml)?;
        for (key, entry) in raw {
            match Breakpoint::from_key(&key) {
                Some(breakpoint) => match entry {
                    ClassEntry::Map(classes) => {
                        map.breakpoints.insert(breakpoint, classes);
                    }
                    ClassEntry::Class(_) => {
                        return Err(StyleMapError::InvalidBreakpointMap { breakpoint })
                    }
                },
                None => {
                    map.base.insert(key, entry);
                }
            }
        }
        Ok(map)
    }

    /// Reads and parses a style-class map from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleMapError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StyleMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Adds a base entry, returning `self` for chaining.
    pub fn with(mut self, property: impl Into<String>, entry: impl Into<ClassEntry>) -> Self {
        self.base.insert(property.into(), entry.into());
        self
    }

    /// Adds a breakpoint entry, returning `self` for chaining.
    pub fn with_breakpoint(
        mut self,
        breakpoint: Breakpoint,
        property: impl Into<String>,
        entry: impl Into<ClassEntry>,
    ) -> Self {
        self.breakpoints
            .entry(breakpoint)
            .or_default()
            .insert(property.into(), entry.into());
        self
    }

    /// Base entry of a property.
    pub fn get(&self, property: &str) -> Option<&ClassEntry> {
        self.base.get(property)
    }

    /// Entries applied regardless of breakpoint.
    pub fn base(&self) -> &ClassMap {
        &self.base
    }

    /// Classes of a breakpoint, if the map declares it.
    pub fn breakpoint(&self, breakpoint: Breakpoint) -> Option<&ClassMap> {
        self.breakpoints.get(&breakpoint)
    }

    /// Returns `true` if any breakpoint sub-map is declared.
    pub fn has_responsive_variants(&self) -> bool {
        !self.breakpoints.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.breakpoints.is_empty()
    }

    /// Derives a breakpoint sub-map per breakpoint from the base entries.
    ///
    /// With `remove_initial` the base entries are dropped and only the
    /// breakpoint sub-maps remain.
    pub fn add_responsive_variants(mut self, remove_initial: bool) -> Self {
        for bp in Breakpoint::ALL {
            let derived = self.breakpoints.entry(bp).or_default();
            for (property, entry) in &self.base {
                derived.insert(property.clone(), entry.with_modifier(bp.style_modifier()));
            }
        }
        if remove_initial {
            self.base.clear();
        }
        self
    }

    /// Returns a map with `other` merged on top of this one.
    ///
    /// Base entries are replaced by property; breakpoint sub-maps are merged
    /// deeply.
    pub fn merge(&self, other: &StyleClassMap) -> StyleClassMap {
        let mut merged = self.clone();
        for (property, entry) in &other.base {
            merged.base.insert(property.clone(), entry.clone());
        }
        for (bp, classes) in &other.breakpoints {
            merge_class_maps(merged.breakpoints.entry(*bp).or_default(), classes);
        }
        merged
    }
}

/// Declares a component's style-class map from three parts.
///
/// - `general`: classes applied as declared
/// - `responsive`: classes only applied per breakpoint
/// - `with_responsive`: classes applied both as declared and per breakpoint
pub fn declare_style_class_map(
    general: StyleClassMap,
    responsive: StyleClassMap,
    with_responsive: StyleClassMap,
) -> StyleClassMap {
    general
        .merge(&responsive.add_responsive_variants(true))
        .merge(&with_responsive.add_responsive_variants(false))
}
