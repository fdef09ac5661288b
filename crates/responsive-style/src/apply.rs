//! Applying property values to style-class maps.
//!
//! Resolution doesn't consult any property definition: normalize the values
//! first so that defaults are filled in and breakpoint values are spread.
//!
//! # Resolution Rules
//!
//! | Value | Entry | Result |
//! |-------|-------|--------|
//! | string / number | map | class keyed by the value |
//! | `true` | class | the class |
//! | `false` | any | nothing |
//! | map | map | resolved key by key |
//!
//! Breakpoint classes are resolved per breakpoint from the breakpoint value
//! of a property, or from its base value unless the breakpoint is optional,
//! and added to the base classes of the property.

use indexmap::IndexMap;
use responsive_props::{Breakpoint, Value, ValueKind, Values};

use crate::class_map::{ClassEntry, StyleClassMap};

/// Classes resolved for one property.
#[derive(Debug, Clone, PartialEq)]
pub enum AppliedClass {
    /// Space-separated class names.
    Class(String),
    /// Classes resolved per nested property.
    Map(IndexMap<String, AppliedClass>),
}

impl AppliedClass {
    fn from_entry(entry: &ClassEntry) -> Self {
        match entry {
            ClassEntry::Class(name) => AppliedClass::Class(name.clone()),
            ClassEntry::Map(map) => AppliedClass::Map(
                map.iter()
                    .map(|(key, entry)| (key.clone(), AppliedClass::from_entry(entry)))
                    .collect(),
            ),
        }
    }

    /// Returns the class string, unless classes were resolved per nested property.
    pub fn as_class(&self) -> Option<&str> {
        match self {
            AppliedClass::Class(name) => Some(name),
            AppliedClass::Map(_) => None,
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            AppliedClass::Class(name) => {
                out.extend(name.split_whitespace());
            }
            AppliedClass::Map(map) => {
                for applied in map.values() {
                    applied.collect(out);
                }
            }
        }
    }
}

/// Combines two resolved class sets.
///
/// Class strings are joined with a space, maps are merged key by key, and
/// anything else resolves to `new`.
pub fn merge_class_styles(base: AppliedClass, new: AppliedClass) -> AppliedClass {
    match (base, new) {
        (AppliedClass::Class(base), AppliedClass::Class(new)) => {
            AppliedClass::Class(format!("{} {}", base, new))
        }
        (AppliedClass::Map(mut base), AppliedClass::Map(new)) => {
            for (key, applied) in new {
                merge_into(&mut base, key, applied);
            }
            AppliedClass::Map(base)
        }
        (_, new) => new,
    }
}

// Merges in place, keeping the position of existing keys.
fn merge_into(map: &mut IndexMap<String, AppliedClass>, key: String, applied: AppliedClass) {
    match map.get_mut(&key) {
        Some(existing) => {
            let previous = std::mem::replace(existing, AppliedClass::Class(String::new()));
            *existing = merge_class_styles(previous, applied);
        }
        None => {
            map.insert(key, applied);
        }
    }
}

/// Classes resolved for a values tree, keyed by property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedStyles {
    entries: IndexMap<String, AppliedClass>,
}

impl AppliedStyles {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&AppliedClass> {
        self.entries.get(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AppliedClass)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds classes for a property, merging with any already resolved.
    pub fn add(&mut self, property: impl Into<String>, applied: AppliedClass) {
        merge_into(&mut self.entries, property.into(), applied);
    }

    /// All resolved class names, in resolution order.
    pub fn classes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for applied in self.entries.values() {
            applied.collect(&mut out);
        }
        out
    }

    /// All resolved class names as a single space-separated string.
    pub fn class_list(&self) -> String {
        self.classes().join(" ")
    }
}

/// Resolves the classes of `value` in `entry`.
///
/// Returns `None` when nothing matches.
pub fn get_style_from_value(entry: &ClassEntry, value: &Value) -> Option<AppliedClass> {
    match value.kind() {
        ValueKind::Scalar => {
            let key = value.lookup_key()?;
            entry.as_map()?.get(&key).map(AppliedClass::from_entry)
        }
        ValueKind::Flag => match (value.as_bool(), entry) {
            (Some(true), ClassEntry::Class(name)) => Some(AppliedClass::Class(name.clone())),
            _ => None,
        },
        ValueKind::Struct => {
            let classes = entry.as_map()?;
            let values = value.as_map()?;
            let applied: IndexMap<String, AppliedClass> = values
                .iter()
                .filter_map(|(key, inner)| {
                    let inner_entry = classes.get(key)?;
                    get_style_from_value(inner_entry, inner).map(|applied| (key.clone(), applied))
                })
                .collect();
            if applied.is_empty() {
                None
            } else {
                Some(AppliedClass::Map(applied))
            }
        }
    }
}

/// Resolves the classes of a values tree.
///
/// ```rust
/// use responsive_props::{Breakpoint, Values};
/// use responsive_style::{apply_values_to_style_map, ClassEntry, StyleClassMap};
///
/// let map = StyleClassMap::new()
///     .with("direction", ClassEntry::classes([("inline", "Stack--dir-inline")]))
///     .add_responsive_variants(false);
///
/// let values = Values::new()
///     .with("direction", "inline")
///     .with_breakpoint(Breakpoint::Narrow, Values::new().with("direction", "inline"));
///
/// let applied = apply_values_to_style_map(&map, &values);
/// assert_eq!(
///     applied.class_list(),
///     "Stack--dir-inline Stack--dir-inline-whenNarrow Stack--dir-inline-whenRegular"
/// );
/// ```
pub fn apply_values_to_style_map(map: &StyleClassMap, values: &Values) -> AppliedStyles {
    let mut applied = AppliedStyles::new();

    for (property, value) in values {
        if Breakpoint::is_breakpoint_key(property) {
            continue;
        }
        let Some(entry) = map.get(property) else {
            continue;
        };
        match get_style_from_value(entry, value) {
            Some(classes) => applied.add(property.clone(), classes),
            None if value.as_bool() != Some(false) => {
                log::debug!("'{}': no class declared for value '{}'", property, value);
            }
            None => {}
        }
    }

    if map.has_responsive_variants() {
        for bp in Breakpoint::ALL {
            let Some(classes) = map.breakpoint(bp) else {
                continue;
            };
            for (property, entry) in classes {
                let value = match values.breakpoint_value(bp, property) {
                    Some(value) => value,
                    None if bp.is_optional() => continue,
                    None => match values.get(property) {
                        Some(value) => value,
                        None => continue,
                    },
                };
                if let Some(resolved) = get_style_from_value(entry, value) {
                    applied.add(property.clone(), resolved);
                }
            }
        }
    }

    applied
}
